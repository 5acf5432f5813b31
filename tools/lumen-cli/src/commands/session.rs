//! Scripted cart sessions.
//!
//! A session script is one command per line; `#` starts a comment.
//!
//! ```text
//! view 1          # open a product page (resets the quantity picker)
//! inc             # quantity picker +1
//! dec             # quantity picker -1
//! qty 5           # set the quantity picker
//! add             # add the viewed product at the picked quantity
//! add 2 3         # add product 2, quantity 3
//! toggle          # press the basket icon
//! press 10 700    # press anywhere on the page
//! clear           # empty the cart
//! show            # render the header badge and preview
//! ```

use std::str::FromStr;

use anyhow::{anyhow, bail, Context as _, Result};
use lumen_commerce::cart::{AddToCartControl, CartStore, QuantityPicker, SubmitOutcome};
use lumen_commerce::catalog::{Catalog, InMemoryCatalog, Product};
use lumen_commerce::preview::{
    ActivationBus, ActivationEvent, MountedPreview, PreviewController, PreviewLayout,
    PreviewView, Rect, EMPTY_CART_MESSAGE, PREVIEW_TITLE,
};
use lumen_commerce::{ProductId, SessionId};
use lumen_observability::{LogFormat, StructuredLogger};

use super::SessionArgs;
use crate::config::CartConfig;
use crate::context::Context;
use crate::output::{badge, Output};

/// Basket icon bounds in the page header.
pub const BASKET_BOUNDS: Rect = Rect::new(960, 16, 24, 24);

/// Preview panel bounds while it is open.
pub const PANEL_BOUNDS: Rect = Rect::new(680, 48, 300, 360);

/// One line of a session script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    View(ProductId),
    Increment,
    Decrement,
    Quantity(u32),
    Add {
        product: Option<ProductId>,
        quantity: Option<u32>,
    },
    Toggle,
    Press { x: i32, y: i32 },
    Clear,
    Show,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("view", [id]) => Self::View(parse_arg(id, "product id")?),
            ("inc", []) => Self::Increment,
            ("dec", []) => Self::Decrement,
            ("qty", [n]) => Self::Quantity(parse_arg(n, "quantity")?),
            ("add", []) => Self::Add {
                product: None,
                quantity: None,
            },
            ("add", [id]) => Self::Add {
                product: Some(parse_arg(id, "product id")?),
                quantity: None,
            },
            ("add", [id, n]) => Self::Add {
                product: Some(parse_arg(id, "product id")?),
                quantity: Some(parse_arg(n, "quantity")?),
            },
            ("toggle", []) => Self::Toggle,
            ("press", [x, y]) => Self::Press {
                x: parse_arg(x, "x")?,
                y: parse_arg(y, "y")?,
            },
            ("clear", []) => Self::Clear,
            ("show", []) => Self::Show,
            (
                "view" | "inc" | "dec" | "qty" | "add" | "toggle" | "press" | "clear" | "show",
                _,
            ) => bail!("wrong number of arguments for '{}'", name),
            _ => bail!("unknown command '{}'", name),
        };

        Ok(command)
    }
}

fn parse_arg<T: FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("invalid {} '{}'", what, value))
}

/// Parse a whole script, skipping blank lines and comments.
pub fn parse_script(script: &str) -> Result<Vec<(usize, SessionCommand)>> {
    script
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((i + 1, line))
        })
        .map(|(number, line)| {
            line.parse()
                .map(|command| (number, command))
                .with_context(|| format!("line {}: '{}'", number, line))
        })
        .collect()
}

/// A shopper session: cart, product page controls and header preview.
pub struct Session {
    catalog: InMemoryCatalog,
    cart: CartStore,
    button: AddToCartControl,
    picker: QuantityPicker,
    viewing: Option<Product>,
    bus: ActivationBus,
    preview: MountedPreview,
    logger: StructuredLogger,
}

impl Session {
    /// Start a session with an empty cart and a closed preview.
    pub fn new(catalog: InMemoryCatalog, cart_config: &CartConfig, logger: StructuredLogger) -> Self {
        let cart = CartStore::new(SessionId::new(logger.session_id()));
        let button = AddToCartControl::new(cart.clone()).with_latency(cart_config.add_latency());
        let bus = ActivationBus::new();
        let layout = PreviewLayout::with_trigger(BASKET_BOUNDS);
        let preview = PreviewController::new(cart.clone(), layout).mount(&bus);

        Self {
            catalog,
            cart,
            button,
            picker: QuantityPicker::with_max(cart_config.max_quantity),
            viewing: None,
            bus,
            preview,
            logger,
        }
    }

    /// The session's cart.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The header preview.
    pub fn preview(&self) -> &MountedPreview {
        &self.preview
    }

    /// Run one command.
    pub async fn execute(&mut self, command: SessionCommand, output: &Output) -> Result<()> {
        match command {
            SessionCommand::View(id) => {
                let product = self.catalog.require(id).await?;
                self.logger
                    .info_builder("product viewed")
                    .field_u64("product_id", id.get())
                    .emit();
                output.info(&format!("{} - {}", product.name, product.formatted_price()));
                self.picker.set(1);
                self.viewing = Some(product);
            }
            SessionCommand::Increment => {
                let value = self.picker.increment();
                output.debug(&format!("quantity {}", value));
            }
            SessionCommand::Decrement => {
                let value = self.picker.decrement();
                output.debug(&format!("quantity {}", value));
            }
            SessionCommand::Quantity(n) => {
                let value = self.picker.set(n);
                if value != n {
                    output.warn(&format!("quantity clamped to {}", value));
                }
            }
            SessionCommand::Add { product, quantity } => self.add(product, quantity, output).await?,
            SessionCommand::Toggle => self.press_basket(),
            SessionCommand::Press { x, y } => {
                let was_open = self.preview.is_open();
                self.bus.dispatch(ActivationEvent::at(x, y));
                self.logger
                    .debug_builder("page pressed")
                    .field_u64("listeners", self.bus.listener_count() as u64)
                    .field_bool("closed_preview", was_open && !self.preview.is_open())
                    .emit();
            }
            SessionCommand::Clear => {
                self.cart.clear();
                self.logger.info("cart cleared");
                output.success("Cart cleared");
            }
            SessionCommand::Show => render(&self.preview, output),
        }

        Ok(())
    }

    /// Run one script line, logging a failure to the session transcript.
    pub async fn run_line(
        &mut self,
        number: usize,
        command: SessionCommand,
        output: &Output,
    ) -> Result<()> {
        let result = self.execute(command, output).await;
        if let Err(e) = &result {
            self.logger
                .error(&format!("script line {} failed: {:#}", number, e));
        }
        result
    }

    async fn add(
        &mut self,
        product: Option<ProductId>,
        quantity: Option<u32>,
        output: &Output,
    ) -> Result<()> {
        let product = match product {
            Some(id) => self.catalog.require(id).await?,
            None => self
                .viewing
                .clone()
                .ok_or_else(|| anyhow!("no product viewed; use 'view <id>' or 'add <id>'"))?,
        };
        let quantity = quantity.unwrap_or_else(|| self.picker.value());

        let spinner = output.spinner("Adding...");
        let started = std::time::Instant::now();
        let outcome = self.button.submit(product.to_ref(), quantity).await;
        spinner.finish_and_clear();

        match outcome {
            SubmitOutcome::Added => {
                self.logger
                    .info_builder("added to cart")
                    .field_u64("product_id", product.id.get())
                    .field_u64("quantity", u64::from(quantity))
                    .field_u64("total_units", self.cart.total_units())
                    .duration_ms("latency_ms", started.elapsed())
                    .emit();
                output.success(&format!("Added {} x {}", quantity, product.name));
            }
            SubmitOutcome::Busy => {
                self.logger
                    .warn_builder("add ignored while another add is in flight")
                    .field_u64("product_id", product.id.get())
                    .emit();
                output.warn("Add to cart is busy");
            }
        }

        Ok(())
    }

    /// Press the basket icon: a page-wide activation followed by the
    /// trigger's own toggle.
    fn press_basket(&self) {
        self.bus.dispatch(ActivationEvent::at(
            BASKET_BOUNDS.x + 1,
            BASKET_BOUNDS.y + 1,
        ));
        let visibility = self.preview.toggle();
        self.preview
            .layout()
            .set_panel(self.preview.is_open().then_some(PANEL_BOUNDS));
        self.logger
            .info_builder("basket pressed")
            .field("visibility", format!("{:?}", visibility))
            .emit();
    }

    /// Final state for JSON output.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "session": self.cart.session().as_str(),
            "visibility": self.preview.visibility(),
            "badge": self.preview.badge(),
            "cart": lumen_commerce::cart::CartSummary::from_state(&self.cart.snapshot()),
        })
    }
}

fn render(preview: &MountedPreview, output: &Output) {
    output.header(&format!("Basket {}", badge(preview.badge())));

    match preview.view() {
        PreviewView::Hidden => output.info("Preview closed"),
        PreviewView::Empty => {
            output.kv(PREVIEW_TITLE, "");
            output.list_item(EMPTY_CART_MESSAGE);
        }
        PreviewView::Items(summary) => {
            output.kv(PREVIEW_TITLE, "");
            for line in &summary.lines {
                output.list_item(&format!(
                    "{}  {}  {}",
                    line.name,
                    line.quantity_label(),
                    line.subtotal_display()
                ));
            }
            output.kv("Total", &summary.total_display());
        }
    }
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let script = match &args.script {
        Some(path) => {
            let path = ctx.resolve_path(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read script: {}", path.display()))?
        }
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };
    let commands = parse_script(&script)?;

    let mut cart_config = ctx.config.cart.clone();
    if let Some(latency_ms) = args.latency_ms {
        cart_config.add_latency_ms = latency_ms;
    }

    let format = if args.log_json {
        LogFormat::Json
    } else {
        ctx.config.log.format
    };
    let logger = StructuredLogger::new(SessionId::generate())
        .with_surface("session")
        .with_format(format)
        .with_min_level(ctx.config.log.level);

    let mut session = Session::new(ctx.catalog()?, &cart_config, logger);
    ctx.output.debug(&format!(
        "Running {} commands in session {}",
        commands.len(),
        session.cart().session()
    ));

    for (number, command) in commands {
        session
            .run_line(number, command, &ctx.output)
            .await
            .with_context(|| format!("line {}", number))?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&session.snapshot());
    } else {
        render(session.preview(), &ctx.output);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_commerce::preview::Visibility;
    use lumen_observability::{LogLevel, MemorySink};

    fn session() -> (Session, MemorySink) {
        let sink = MemorySink::new();
        let logger = StructuredLogger::new("sess_test")
            .with_min_level(LogLevel::Debug)
            .with_sink(sink.clone());
        let session = Session::new(InMemoryCatalog::seeded(), &CartConfig::default(), logger);
        (session, sink)
    }

    async fn run_script(session: &mut Session, script: &str) {
        let output = Output::new(false, true);
        for (_, command) in parse_script(script).unwrap() {
            session.execute(command, &output).await.unwrap();
        }
    }

    #[test]
    fn test_parse_script() {
        let commands = parse_script("view 1\n\n# comment\ninc  \nadd 2 3 # trailing\npress 10 -4\n")
            .unwrap();
        assert_eq!(
            commands,
            vec![
                (1, SessionCommand::View(ProductId::new(1))),
                (4, SessionCommand::Increment),
                (
                    5,
                    SessionCommand::Add {
                        product: Some(ProductId::new(2)),
                        quantity: Some(3),
                    }
                ),
                (6, SessionCommand::Press { x: 10, y: -4 }),
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_script("show\nfly away\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));

        assert!(parse_script("add one").is_err());
        assert!(parse_script("press 1").is_err());
        assert!(parse_script("clear now").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_pick_and_add() {
        let (mut session, sink) = session();
        run_script(&mut session, "view 1\ninc\ninc\nadd\nadd 1 1\n").await;

        assert_eq!(session.cart().line_count(), 1);
        assert_eq!(session.cart().total_units(), 4);
        assert_eq!(session.cart().total_price().display(), "£51.96");
        assert!(sink.lines().iter().any(|l| l.contains("added to cart")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_without_view_fails() {
        let (mut session, _) = session();
        let output = Output::new(false, true);
        let result = session
            .execute(
                SessionCommand::Add {
                    product: None,
                    quantity: None,
                },
                &output,
            )
            .await;
        assert!(result.is_err());
        assert!(session.cart().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_line_is_logged() {
        let (mut session, sink) = session();
        let output = Output::new(false, true);
        let result = session
            .run_line(3, SessionCommand::View(ProductId::new(42)), &output)
            .await;

        assert!(result.is_err());
        let lines = sink.lines();
        let last = lines.last().unwrap();
        assert!(last.contains("\"level\":\"error\""));
        assert!(last.contains("script line 3 failed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_product_fails() {
        let (mut session, _) = session();
        let output = Output::new(false, true);
        assert!(session
            .execute(SessionCommand::View(ProductId::new(42)), &output)
            .await
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_and_outside_press() {
        let (mut session, _) = session();
        run_script(&mut session, "add 2\ntoggle\npress 700 100\n").await;
        assert_eq!(session.preview().visibility(), Visibility::Open);

        run_script(&mut session, "press 10 700\n").await;
        assert_eq!(session.preview().visibility(), Visibility::Closed);

        run_script(&mut session, "toggle\ntoggle\n").await;
        assert_eq!(session.preview().visibility(), Visibility::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_and_snapshot() {
        let (mut session, _) = session();
        run_script(&mut session, "add 1 2\nadd 2\n").await;
        assert_eq!(session.snapshot()["badge"], 3);

        run_script(&mut session, "clear\n").await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot["session"], "sess_test");
        assert!(snapshot["badge"].is_null());
        assert_eq!(snapshot["cart"]["total_units"], 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quantity_is_clamped() {
        let (mut session, _) = session();
        run_script(&mut session, "view 2\nqty 500\nadd\n").await;
        assert_eq!(session.cart().total_units(), 99);
    }
}
