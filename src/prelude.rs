//! Common imports, plus a container and gateway alias per resource
//! (`MovieState`, `MovieDetailState`, `MovieGateway`, ...).

pub use crate::framework::{GatewayError, LoadError, Resource, ResourceGateway, StateError};
pub use crate::http::{ApiClient, AuthSession, HttpGateway};
pub use crate::model::*;
pub use crate::runtime::{Catalog, ClientConfig};
pub use crate::state::{CollectionView, DetailState, DetailView, LoadPhase, ResourceState};

macro_rules! resource_aliases {
    ($($resource:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Listing container of [`" $resource "`]."]
                pub type [<$resource State>] = ResourceState<$resource>;
                #[doc = "Detail container of [`" $resource "`]."]
                pub type [<$resource DetailState>] = DetailState<$resource>;
                #[doc = "HTTP gateway of [`" $resource "`]."]
                pub type [<$resource Gateway>] = HttpGateway<$resource>;
            )*
        }
    };
}

resource_aliases!(Movie, Person, Review, Rating, Genre, Country, Profession, User);
