use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use order_desk::catalog::CatalogDesk;
use order_desk::config::Config;
use order_desk::lifecycle::{setup_tracing, App};
use order_desk::login::{self, LoginForm};
use order_desk::model::{OrderId, ProductId, Role};
use order_desk::ordering::OrderDesk;
use order_desk::orders::{self, OrderBoard};
use order_desk::settings::Settings;
use order_desk::store::PreferenceClient;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "order-desk")]
#[command(about = "Browse the catalog, place orders and manage the shop")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as an administrator or a client
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// admin or client
        #[arg(long)]
        role: Role,
    },
    Logout,
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },
    /// Place one order per item, e.g. `--item Notebook=2 --item Pen=5`
    Order {
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<(String, u32)>,
    },
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum ProductsCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        image: Option<String>,
    },
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    Delete {
        id: u32,
    },
}

#[derive(Subcommand)]
enum OrdersCommand {
    List,
    /// Mark an order as delivered
    Deliver { id: u32 },
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        user_name: Option<String>,
        #[arg(long)]
        dark_mode: Option<bool>,
        #[arg(long)]
        language: Option<String>,
        /// 0 to 100
        #[arg(long)]
        volume: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = Config::init().context("Failed to load configuration")?;
    let app = App::start(config).context("Failed to start")?;

    let started = Instant::now();
    let result = run(&app, cli.command).await;
    record_usage(&app.prefs, started).await;

    app.shutdown().await?;
    result
}

async fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Login {
            email,
            password,
            role,
        } => {
            let mut form = LoginForm::new();
            form.set_email(email);
            form.set_password(password);
            form.select_role(role);
            if let Some(e) = form.email_error() {
                bail!("{e}");
            }
            match form.submit(app.service.as_ref(), &app.prefs).await {
                Some(role) => println!("Logged in as {role}"),
                None => bail!(form
                    .error()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "Email and password are required".to_string())),
            }
        }
        Commands::Logout => {
            login::logout(&app.prefs).await?;
            println!("Logged out");
        }
        Commands::Products { command } => products(app, command).await?,
        Commands::Order { items } => {
            require(&app.prefs, Role::can_place_orders, "place orders").await?;
            place_order(app, items).await?;
        }
        Commands::Orders { command } => {
            require(&app.prefs, Role::can_review_orders, "review orders").await?;
            let mut board = OrderBoard::new(app.service.clone());
            match command {
                OrdersCommand::List => {
                    board.refresh().await;
                    if let Some(e) = board.error() {
                        bail!("{e}");
                    }
                    if board.orders().is_empty() {
                        println!("No orders");
                    }
                    for order in board.orders() {
                        println!("{}", orders::describe(order));
                    }
                }
                OrdersCommand::Deliver { id } => {
                    board.mark_delivered(OrderId(id)).await;
                    if let Some(e) = board.error() {
                        bail!("{e}");
                    }
                    if let Some(status) = board.status() {
                        println!("{status}");
                    }
                }
            }
        }
        Commands::Settings { command } => {
            require(&app.prefs, Role::can_edit_settings, "edit settings").await?;
            let mut settings = Settings::load(&app.prefs).await?;
            if let SettingsCommand::Set {
                user_name,
                dark_mode,
                language,
                volume,
            } = command
            {
                if let Some(name) = user_name {
                    settings.user_name = name;
                }
                if let Some(dark) = dark_mode {
                    settings.dark_mode = dark;
                }
                if let Some(language) = language {
                    if !settings.set_language_name(&language) {
                        bail!("Unknown language: {language}");
                    }
                }
                if let Some(volume) = volume {
                    settings.set_volume(volume);
                }
                settings.save(&app.prefs).await?;
                println!("Settings saved");
            }
            println!("{settings}");
        }
    }
    Ok(())
}

async fn products(app: &App, command: ProductsCommand) -> Result<()> {
    let role = require(&app.prefs, |_| true, "list products").await?;
    if !matches!(command, ProductsCommand::List) && !role.can_manage_catalog() {
        bail!("{role} is not allowed to manage the catalog");
    }

    let mut desk = CatalogDesk::new(app.service.clone());
    match command {
        ProductsCommand::List => desk.refresh().await,
        ProductsCommand::Add { name, price, image } => {
            desk.add_product(&name, &price, image).await
        }
        ProductsCommand::Update { id, name, price } => {
            desk.update_product(ProductId(id), name.as_deref(), price.as_deref())
                .await
        }
        ProductsCommand::Delete { id } => desk.delete_product(ProductId(id)).await,
    }
    if let Some(e) = desk.error() {
        bail!("{e}");
    }
    if desk.success() {
        println!("Done");
    }
    for product in desk.products() {
        println!("{:>4}  {:<30} {:>10.2}", product.id.0, product.name, product.price);
    }
    Ok(())
}

async fn place_order(app: &App, items: Vec<(String, u32)>) -> Result<()> {
    let mut desk = OrderDesk::new(app.service.clone());
    desk.load().await;
    if let Some(e) = desk.error() {
        bail!("{e}");
    }

    for (name, quantity) in items {
        let id = desk
            .find_by_name(&name)
            .map(|line| line.product_id())
            .ok_or_else(|| anyhow!("Unknown product: {name}"))?;
        desk.set_quantity(id, quantity)?;
    }
    println!("Total: {:.2}", desk.total_amount());

    let report = desk.place_order().await;
    if !report.is_empty() {
        println!("{report}");
    }
    if let Some(e) = desk.error() {
        bail!("{e}");
    }
    Ok(())
}

/// The logged-in role, if it may perform `what`.
async fn require(prefs: &PreferenceClient, allowed: fn(&Role) -> bool, what: &str) -> Result<Role> {
    let role = login::current_role(prefs)
        .await?
        .ok_or_else(|| anyhow!("Not logged in. Run `order-desk login` first"))?;
    if !allowed(&role) {
        bail!("{role} is not allowed to {what}");
    }
    Ok(role)
}

async fn record_usage(prefs: &PreferenceClient, started: Instant) {
    match login::current_role(prefs).await {
        Ok(Some(_)) => {}
        _ => return,
    }
    let result = async {
        let mut settings = Settings::load(prefs).await?;
        settings.record_usage(prefs, started.elapsed()).await
    }
    .await;
    match result {
        Ok(()) => info!(elapsed = ?started.elapsed(), "Usage recorded"),
        Err(e) => warn!(error = %e, "Could not record usage"),
    }
}

fn parse_item(raw: &str) -> Result<(String, u32), String> {
    let (name, quantity) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QUANTITY, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing product name in `{raw}`"));
    }
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in `{raw}`"))?;
    Ok((name.to_string(), quantity))
}
