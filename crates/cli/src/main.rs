//! Storekeep CLI - dashboard management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Start a session (any non-empty credentials; the demo API has no auth)
//! sk-cli login -u admin -p secret
//!
//! # Manage users
//! sk-cli users list
//! sk-cli users create -u mgrant -e m.grant@example.com --first-name Mara --last-name Grant
//!
//! # Manage orders
//! sk-cli orders list
//! sk-cli orders add-line --order 3 --product 7 --quantity 2
//! sk-cli orders range --start 2024-04-01 --end 2024-04-30
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - session lifecycle
//! - `users` - list, get, create, update, delete
//! - `orders` - list, get, create, delete, line operations, date ranges

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sk-cli")]
#[command(author, version, about = "Storekeep dashboard management tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session
    Login {
        /// Username to display while logged in
        #[arg(short, long)]
        username: String,

        /// Password (any non-empty value is accepted)
        #[arg(short, long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,
    /// Show one user
    Get {
        /// User id
        id: i32,
    },
    /// Create a user
    Create {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Address city
        #[arg(long)]
        city: Option<String>,

        /// Address street
        #[arg(long)]
        street: Option<String>,

        /// Group label
        #[arg(long, default_value = storekeep_admin::conversions::DEFAULT_ROLE)]
        role: String,

        /// Department label
        #[arg(long, default_value = storekeep_admin::conversions::DEFAULT_DEPARTMENT)]
        department: String,

        /// Grant the admin flag
        #[arg(long)]
        admin: bool,

        /// Grant the representative flag
        #[arg(long)]
        representative: bool,
    },
    /// Update a user (only the given fields change)
    Update {
        /// User id
        id: i32,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        department: Option<String>,
    },
    /// Delete a user
    Delete {
        /// User id
        id: i32,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List all orders, or one user's orders
    List {
        /// Restrict to one user
        #[arg(long)]
        user: Option<i32>,
    },
    /// Show one order with its lines
    Get {
        /// Order id
        id: i32,
    },
    /// Create an empty order (add lines afterwards)
    Create {
        /// Owning user id
        #[arg(long)]
        user: i32,

        /// Order date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an order
    Delete {
        /// Order id
        id: i32,
    },
    /// Add a product line to an order
    AddLine {
        /// Order id
        #[arg(long)]
        order: i32,

        /// Product id (price and title are snapshotted from the catalog)
        #[arg(long)]
        product: i32,

        /// Quantity
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change one line of an order
    UpdateLine {
        /// Order id
        #[arg(long)]
        order: i32,

        /// Line id within the order
        #[arg(long)]
        line: i32,

        /// New quantity
        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Remove one line from an order
    RemoveLine {
        /// Order id
        #[arg(long)]
        order: i32,

        /// Line id within the order
        #[arg(long)]
        line: i32,
    },
    /// List orders in an inclusive date range
    Range {
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Restrict to one user
        #[arg(long)]
        user: Option<i32>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { username, password } => commands::session::login(&username, &password)?,
        Commands::Logout => commands::session::logout()?,
        Commands::Whoami => commands::session::whoami()?,
        Commands::Users { action } => {
            let ctx = commands::Context::from_env()?;
            ctx.sessions.require_login()?;
            match action {
                UserAction::List => commands::users::list(&ctx).await?,
                UserAction::Get { id } => commands::users::get(&ctx, id).await?,
                UserAction::Create {
                    username,
                    email,
                    first_name,
                    last_name,
                    phone,
                    city,
                    street,
                    role,
                    department,
                    admin,
                    representative,
                } => {
                    let input = commands::users::CreateArgs {
                        username,
                        email,
                        first_name,
                        last_name,
                        phone,
                        city,
                        street,
                        role,
                        department,
                        admin,
                        representative,
                    };
                    commands::users::create(&ctx, input).await?;
                }
                UserAction::Update {
                    id,
                    username,
                    email,
                    first_name,
                    last_name,
                    phone,
                    role,
                    department,
                } => {
                    let patch = commands::users::UpdateArgs {
                        username,
                        email,
                        first_name,
                        last_name,
                        phone,
                        role,
                        department,
                    };
                    commands::users::update(&ctx, id, patch).await?;
                }
                UserAction::Delete { id } => commands::users::delete(&ctx, id).await?,
            }
        }
        Commands::Orders { action } => {
            let ctx = commands::Context::from_env()?;
            ctx.sessions.require_login()?;
            match action {
                OrderAction::List { user } => commands::orders::list(&ctx, user).await?,
                OrderAction::Get { id } => commands::orders::get(&ctx, id).await?,
                OrderAction::Create { user, date } => {
                    commands::orders::create(&ctx, user, date.as_deref()).await?;
                }
                OrderAction::Delete { id } => commands::orders::delete(&ctx, id).await?,
                OrderAction::AddLine {
                    order,
                    product,
                    quantity,
                } => commands::orders::add_line(&ctx, order, product, quantity).await?,
                OrderAction::UpdateLine {
                    order,
                    line,
                    quantity,
                } => commands::orders::update_line(&ctx, order, line, quantity).await?,
                OrderAction::RemoveLine { order, line } => {
                    commands::orders::remove_line(&ctx, order, line).await?;
                }
                OrderAction::Range { start, end, user } => {
                    commands::orders::range(&ctx, &start, &end, user).await?;
                }
            }
        }
    }
    Ok(())
}
