//! # catalog
//!
//! Terminal view of the movie catalog.
//!
//! ```bash
//! catalog list movie --param genre=Drama --page 2
//! catalog show person 12
//! catalog login alice            # password from --password or CATALOG_PASSWORD
//! catalog me
//! catalog logout
//! ```

use catalog_client::framework::{LoadError, Resource};
use catalog_client::model::{
    Country, Genre, Movie, MovieSummary, Person, PersonSummary, Profession, QueryParams, Rating,
    Review, ReviewSummary, SignUp, User,
};
use catalog_client::runtime::{setup_tracing, Catalog, ClientConfig, ResourceKind};
use catalog_client::state::{update_page, CollectionView};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Instrument};

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Browse the movie catalog")]
struct Cli {
    /// API root, overriding the config file
    #[arg(long, env = "CATALOG_BASE_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of a resource listing
    List {
        resource: ResourceKind,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
        /// Filter as key=value, repeatable
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Width of the page-number window
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        width: Option<u64>,
    },
    /// Show one entity
    Show { resource: ResourceKind, id: u64 },
    /// Log in and remember the token
    Login {
        username: String,
        #[arg(long, env = "CATALOG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the token
    Logout,
    /// Show the logged-in user
    Me,
    /// Create an account
    Signup {
        username: String,
        email: String,
        #[arg(long, env = "CATALOG_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::load_unvalidated()
        .map_err(|e| e.to_string())?
        .with_base_url_override(cli.base_url);
    config.validate().map_err(|e| e.to_string())?;
    let catalog = Catalog::new(config).map_err(|e| e.to_string())?;

    match cli.command {
        Command::List {
            resource,
            page,
            params,
            width,
        } => {
            let params = update_page(&params.into_iter().collect(), page);
            let span = tracing::info_span!("list", %resource);
            dispatch_list(&catalog, resource, params, width)
                .instrument(span)
                .await
        }
        Command::Show { resource, id } => {
            let span = tracing::info_span!("show", %resource, id);
            dispatch_show(&catalog, resource, id).instrument(span).await
        }
        Command::Login { username, password } => {
            catalog
                .auth()
                .login(&username, &password)
                .await
                .map_err(|e| e.to_string())?;
            if let Some(user) = catalog.auth().user() {
                println!("Logged in as {}", user.username);
            }
            Ok(())
        }
        Command::Logout => {
            if !catalog.auth().is_authenticated() {
                println!("Not logged in");
                return Ok(());
            }
            catalog.auth().logout().await.map_err(|e| e.to_string())?;
            println!("Logged out");
            Ok(())
        }
        Command::Me => {
            match catalog
                .auth()
                .fetch_user()
                .await
                .map_err(|e| e.to_string())?
            {
                Some(user) => print_json(&user),
                None => {
                    println!("Not logged in");
                    Ok(())
                }
            }
        }
        Command::Signup {
            username,
            email,
            password,
        } => {
            let user = catalog
                .auth()
                .signup(&SignUp {
                    username,
                    email,
                    password1: password.clone(),
                    password2: password,
                })
                .await
                .map_err(|e| e.to_string())?;
            info!(user_id = user.id, "Account created");
            println!("Created account {}", user.username);
            Ok(())
        }
    }
}

async fn dispatch_list(
    catalog: &Catalog,
    resource: ResourceKind,
    params: QueryParams,
    width: Option<u64>,
) -> Result<(), String> {
    match resource {
        ResourceKind::Movie => list::<Movie>(catalog, params, width).await,
        ResourceKind::Person => list::<Person>(catalog, params, width).await,
        ResourceKind::Review => list::<Review>(catalog, params, width).await,
        ResourceKind::Rating => list::<Rating>(catalog, params, width).await,
        ResourceKind::Genre => list::<Genre>(catalog, params, width).await,
        ResourceKind::Country => list::<Country>(catalog, params, width).await,
        ResourceKind::Profession => list::<Profession>(catalog, params, width).await,
        ResourceKind::User => list::<User>(catalog, params, width).await,
    }
}

async fn dispatch_show(catalog: &Catalog, resource: ResourceKind, id: u64) -> Result<(), String> {
    match resource {
        ResourceKind::Movie => show::<Movie>(catalog, id).await,
        ResourceKind::Person => show::<Person>(catalog, id).await,
        ResourceKind::Review => show::<Review>(catalog, id).await,
        ResourceKind::Rating => show::<Rating>(catalog, id).await,
        ResourceKind::Genre => show::<Genre>(catalog, id).await,
        ResourceKind::Country => show::<Country>(catalog, id).await,
        ResourceKind::Profession => show::<Profession>(catalog, id).await,
        ResourceKind::User => show::<User>(catalog, id).await,
    }
}

async fn list<R>(catalog: &Catalog, params: QueryParams, width: Option<u64>) -> Result<(), String>
where
    R: Resource,
    R::Summary: Row,
{
    let state = catalog.resource_state::<R>();
    if let Some(width) = width {
        state.set_max_visible_pages(width);
    }
    state.load_items(params).await.map_err(|e| e.to_string())?;

    let view = state.snapshot();
    let warning = listing_warning(view.error)?;
    render_listing(&view);
    if let Some(warning) = warning {
        eprintln!("{warning}");
    }
    Ok(())
}

/// Splits a listing's load error into fatal (no rows to show) and a warning printed after
/// the rows. A failed filter call leaves the page itself intact.
fn listing_warning(error: Option<LoadError>) -> Result<Option<String>, String> {
    match error {
        None => Ok(None),
        Some(LoadError::FilterFailed) => Ok(Some(LoadError::FilterFailed.to_string())),
        Some(error) => Err(error.to_string()),
    }
}

async fn show<R>(catalog: &Catalog, id: u64) -> Result<(), String>
where
    R: Resource<Id = u64> + Serialize,
{
    let state = catalog.detail_state::<R>();
    state.load_items(&id).await.map_err(|e| e.to_string())?;

    let view = state.snapshot();
    match (view.error, view.entity) {
        (Some(error), _) => Err(error.to_string()),
        (None, Some(entity)) => print_json(&entity),
        (None, None) => Err(format!("{} {id} not found", R::PATH)),
    }
}

fn render_listing<R: Resource>(view: &CollectionView<R>)
where
    R::Summary: Row,
{
    for item in &view.items {
        println!("{}", item.row());
    }
    println!();
    println!("Showing {} of {}", view.shown_items(), view.count);

    let current = view.current_page();
    let pages: Vec<String> = view
        .visible_pages()
        .into_iter()
        .map(|page| {
            if page == current {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    if !pages.is_empty() {
        println!("Pages: {} (of {})", pages.join(" "), view.total_pages());
    }

    if !view.filter_options.is_empty() {
        println!("Filters:");
        for field in view.filter_options.fields() {
            println!("  {field}: {}", view.filter_options.choices(field).join(", "));
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

/// One-line rendering of a listing row.
trait Row {
    fn row(&self) -> String;
}

impl Row for MovieSummary {
    fn row(&self) -> String {
        let year = self
            .release_year
            .map_or_else(|| "----".to_string(), |year| year.to_string());
        format!("{:>6}  {year}  {:>4.1}  {}", self.id, self.rate, self.title)
    }
}

impl Row for PersonSummary {
    fn row(&self) -> String {
        let born = self.birth_date.as_deref().unwrap_or("");
        format!("{:>6}  {}  {born}", self.id, self.full_name)
    }
}

impl Row for ReviewSummary {
    fn row(&self) -> String {
        format!(
            "{:>6}  {}  on {} by {}",
            self.id,
            self.title,
            self.movie.label(),
            self.user.label()
        )
    }
}

impl Row for Rating {
    fn row(&self) -> String {
        format!(
            "{:>6}  {:>4.1}  {} by {}",
            self.id,
            self.rate,
            self.movie.label(),
            self.user.label()
        )
    }
}

impl Row for Genre {
    fn row(&self) -> String {
        format!("{:>6}  {}", self.id, self.name)
    }
}

impl Row for Country {
    fn row(&self) -> String {
        format!("{:>6}  {}", self.id, self.name)
    }
}

impl Row for Profession {
    fn row(&self) -> String {
        format!(
            "{:>6}  {}  {} in {}",
            self.id,
            self.name,
            self.person.label(),
            self.movie.label()
        )
    }
}

impl Row for User {
    fn row(&self) -> String {
        let role = self.role.as_deref().unwrap_or("");
        format!("{:>6}  {}  {role}", self.id, self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_failure_still_renders_rows() {
        assert_eq!(listing_warning(None), Ok(None));
        assert_eq!(
            listing_warning(Some(LoadError::FilterFailed)),
            Ok(Some("Failed to load filters".to_string()))
        );
        assert_eq!(
            listing_warning(Some(LoadError::ListFailed)),
            Err("Failed to load data".to_string())
        );
    }

    #[test]
    fn test_page_and_width_must_be_positive() {
        assert!(Cli::try_parse_from(["catalog", "list", "movie", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["catalog", "list", "movie", "--width", "0"]).is_err());

        let cli = Cli::try_parse_from(["catalog", "list", "movie", "--page", "2", "--width", "5"])
            .unwrap();
        match cli.command {
            Command::List { page, width, .. } => {
                assert_eq!(page, 2);
                assert_eq!(width, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
