//! Catalog browsing commands.

use anyhow::{Context as _, Result};
use lumen_commerce::catalog::{Catalog, InMemoryCatalog, Product};
use lumen_commerce::ProductId;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::or_dash;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    match args.command.unwrap_or(CatalogCommand::List) {
        CatalogCommand::List => list_products(&catalog, ctx).await,
        CatalogCommand::Show { id } => show_product(&catalog, ProductId::new(id), ctx).await,
        CatalogCommand::Export { output } => export_catalog(&catalog, &output, ctx),
    }
}

async fn list_products(catalog: &InMemoryCatalog, ctx: &Context) -> Result<()> {
    let products = catalog.products().await?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", products.len()));

    let widths = [4, 32, 10, 20];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "DETAILS"], &widths);
    for product in &products {
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                &product.formatted_price(),
                &product.subtitle(),
            ],
            &widths,
        );
    }

    Ok(())
}

async fn show_product(catalog: &InMemoryCatalog, id: ProductId, ctx: &Context) -> Result<()> {
    let product = catalog
        .require(id)
        .await
        .with_context(|| format!("Cannot show product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("subtitle", &product.subtitle());
    ctx.output.kv("price", &product.formatted_price());
    ctx.output.kv("image", product.image_or_placeholder());

    if let Some(description) = &product.description {
        ctx.output.header("Description");
        println!("  {}", description);
    }

    ctx.output.header("Specifications");
    for (label, value) in specifications(&product) {
        ctx.output.kv(label, &value);
    }

    Ok(())
}

/// Rows of the product page's specifications table.
fn specifications(product: &Product) -> [(&'static str, String); 5] {
    [
        ("Brand", or_dash(product.brand.clone())),
        ("Item weight (g)", or_dash(product.weight.map(|w| w.to_string()))),
        ("Dimensions (cm)", or_dash(product.dimensions())),
        ("Item Model number", or_dash(product.model_code.clone())),
        ("Colour", or_dash(product.colour.clone())),
    ]
}

fn export_catalog(catalog: &InMemoryCatalog, output: &str, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(output);
    let json = catalog.to_json()?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    ctx.output.success(&format!(
        "Exported {} products to {}",
        catalog.len(),
        path.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_commerce::Money;

    #[test]
    fn test_specifications_for_seeded_bulb() {
        let catalog = InMemoryCatalog::seeded();
        let rows = specifications(&lumen_commerce::catalog::seed_products()[0]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(rows[0].0, "Brand");
        assert_eq!(rows[4].0, "Colour");
        assert!(rows.iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn test_specifications_fill_missing_with_dash() {
        let product = Product::new(ProductId::new(9), "Bare", Money::new(100));
        let rows = specifications(&product);
        assert!(rows.iter().all(|(_, v)| v == "-"));
    }
}
