//! Dish commands - list, add, edit, status and delete.

use crate::{
    cli::{DishArgs, ListArgs, commands::reply_error},
    core::{
        board::MenuBoard,
        dish::{DishStatus, ItemId, MenuItem},
        form::{DishForm, FieldEdit, FormMode},
        image::read_image_file,
        listing::{MenuQuery, MenuStats},
    },
    errors::{Error, Result},
};

/// Turns the provided arguments into form edits. The MRP comes before the
/// selling price so an explicit MRP is not replaced by the no-discount default.
async fn field_edits(fields: DishArgs) -> Result<Vec<FieldEdit>> {
    let mut edits = Vec::new();
    if let Some(name) = fields.name {
        edits.push(FieldEdit::Name(name));
    }
    if let Some(description) = fields.description {
        edits.push(FieldEdit::Description(description));
    }
    if let Some(mrp) = fields.mrp {
        edits.push(FieldEdit::BasePrice(mrp));
    }
    if let Some(price) = fields.price {
        edits.push(FieldEdit::VendorPrice(price));
    }
    if let Some(status) = fields.status {
        edits.push(FieldEdit::Status(status.into()));
    }
    if let Some(time) = fields.opens {
        edits.push(FieldEdit::OpeningTime(time));
    }
    if let Some(time) = fields.closes {
        edits.push(FieldEdit::ClosingTime(time));
    }
    if let Some(flag) = fields.veg {
        edits.push(FieldEdit::Vegetarian(flag));
    }
    if let Some(cuisine) = fields.cuisine {
        edits.push(FieldEdit::Cuisine(Some(cuisine)));
    }
    if let Some(food_type) = fields.food_type {
        edits.push(FieldEdit::FoodType(Some(food_type)));
    }
    if let Some(flag) = fields.bulk_only {
        edits.push(FieldEdit::BulkOnly(flag));
    }
    if let Some(path) = fields.image {
        edits.push(FieldEdit::Image(read_image_file(&path).await?));
    }
    Ok(edits)
}

/// One listing line.
#[must_use]
pub fn format_dish_line(item: &MenuItem) -> String {
    let diet = if item.is_vegetarian { "Veg" } else { "Non-veg" };
    format!(
        "#{} {} | ₹{:.2} (MRP ₹{:.2}, tax ₹{:.2}) | {} | {} / {} | {diet}",
        item.item_id,
        item.item_name,
        item.vendor_price,
        item.base_price,
        item.tax,
        item.status,
        item.cuisine.label(),
        item.food_type.label(),
    )
}

fn format_stats(stats: &MenuStats) -> String {
    let mut summary = format!(
        "📋 {} dishes: {} active, {} closed, {} inactive",
        stats.total, stats.active, stats.closed, stats.inactive
    );
    if stats.pending > 0 {
        summary.push_str(&format!(", {} pending approval", stats.pending));
    }
    summary
}

/// Shows the menu filtered and sorted as requested.
pub async fn list(board: &MenuBoard, args: &ListArgs) -> Result<String> {
    let query = MenuQuery {
        search: args.search.clone().unwrap_or_default(),
        cuisine: args.cuisine.clone(),
        food_type: args.food_type.clone(),
        sort: args.sort,
        ranking: board.lifecycle().ranking(),
    };
    let shown = board.view(&query).await;

    let mut lines = Vec::new();
    if args.stats {
        let stats = board.stats().await;
        lines.push(format_stats(&stats));
        let filters = query.active_filter_count();
        if filters > 0 {
            lines.push(format!(
                "🔎 {filters} filter(s) active, showing {} of {}",
                shown.len(),
                stats.total
            ));
        }
    }

    if shown.is_empty() {
        lines.push("No dishes match the current filters.".to_string());
    } else {
        lines.extend(shown.iter().map(format_dish_line));
    }
    Ok(lines.join("\n"))
}

async fn submit(board: &MenuBoard, form: &mut DishForm, fields: DishArgs) -> Result<()> {
    let edits = field_edits(fields).await?;
    form.apply_all(edits)?;
    match form.mode() {
        FormMode::Create { .. } => board.create(form).await,
        FormMode::Edit { .. } => board.update(form).await,
    }
}

/// Creates a dish from the provided fields.
pub async fn add(board: &MenuBoard, fields: DishArgs) -> Result<String> {
    let mut form = board.create_form();
    match submit(board, &mut form, fields).await {
        Ok(()) => Ok(format!(
            "✅ Dish '{}' added at ₹{} (tax ₹{:.2}).",
            form.name(),
            form.vendor_price().trim(),
            form.tax()
        )),
        Err(e) => reply_error(e),
    }
}

/// Applies the provided fields to an existing dish.
pub async fn edit(board: &MenuBoard, item_id: ItemId, fields: DishArgs) -> Result<String> {
    let mut form = match board.edit_form(item_id).await {
        Ok(form) => form,
        Err(e) => return reply_error(e),
    };
    match submit(board, &mut form, fields).await {
        Ok(()) => Ok(format!("✅ Dish '{}' updated.", form.name())),
        Err(e) => reply_error(e),
    }
}

/// Changes a dish's availability.
pub async fn status(board: &MenuBoard, item_id: ItemId, status: DishStatus) -> Result<String> {
    match board.transition(item_id, status).await {
        Ok(()) => {
            let name = board
                .item(item_id)
                .await
                .map_or_else(|| format!("#{item_id}"), |item| item.item_name);
            Ok(format!("✅ '{name}' is now {status}."))
        }
        Err(e) => reply_error(e),
    }
}

/// Removes a dish from the menu.
pub async fn delete(board: &MenuBoard, item_id: ItemId) -> Result<String> {
    let Some(item) = board.item(item_id).await else {
        return reply_error(Error::DishNotFound { id: item_id });
    };
    match board.remove(item_id).await {
        Ok(()) => Ok(format!("🗑️ '{}' removed from the menu.", item.item_name)),
        Err(e) => reply_error(e),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        cli::StatusArg,
        client::DishBackend,
        core::{
            catalog::{Cuisine, FoodType},
            listing::{CategoryFilter, SortKey, StatusLifecycle},
        },
        test_utils::{create_test_dish, setup_test_store},
    };
    use rust_decimal_macros::dec;
    use std::{io::Write, sync::Arc};

    async fn board_with_dishes() -> Result<MenuBoard> {
        let store = setup_test_store().await?;
        create_test_dish(&store, 1, "Tea", dec!(20)).await?;
        create_test_dish(&store, 1, "Coffee", dec!(35)).await?;
        create_test_dish(&store, 1, "Bun Maska", dec!(30)).await?;
        let backend: Arc<dyn DishBackend> = Arc::new(store);
        MenuBoard::load(backend, 1, StatusLifecycle::ThreeState).await
    }

    #[tokio::test]
    async fn test_list_sorted_by_price() -> Result<()> {
        let board = board_with_dishes().await?;
        let args = ListArgs {
            sort: SortKey::Price,
            ..ListArgs::default()
        };
        let reply = list(&board, &args).await?;
        let names: Vec<_> = reply
            .lines()
            .map(|line| line.split(" | ").next().unwrap())
            .collect();
        assert_eq!(names, vec!["#1 Tea", "#3 Bun Maska", "#2 Coffee"]);
        assert!(reply.contains("₹20.00 (MRP ₹20.00, tax ₹1.00)"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_with_stats_and_search() -> Result<()> {
        let board = board_with_dishes().await?;
        let args = ListArgs {
            search: Some("COF".to_string()),
            stats: true,
            ..ListArgs::default()
        };
        let reply = list(&board, &args).await?;
        assert!(reply.starts_with("📋 3 dishes: 3 active, 0 closed, 0 inactive"));
        assert!(reply.contains("1 filter(s) active, showing 1 of 3"));
        assert!(reply.contains("#2 Coffee"));
        assert!(!reply.contains("Tea"));

        let args = ListArgs {
            food_type: CategoryFilter::Only(FoodType::Biryani.into()),
            ..ListArgs::default()
        };
        assert_eq!(
            list(&board, &args).await?,
            "No dishes match the current filters."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_add_dish() -> Result<()> {
        let board = board_with_dishes().await?;
        let fields = DishArgs {
            name: Some("filter coffee".to_string()),
            price: Some("40".to_string()),
            cuisine: Some(Cuisine::Tamil),
            food_type: Some(FoodType::Beverage),
            ..DishArgs::default()
        };
        let reply = add(&board, fields).await?;
        assert_eq!(reply, "✅ Dish 'Filter Coffee' added at ₹40 (tax ₹2.00).");
        assert_eq!(board.items().await.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_rejects_price_above_mrp() -> Result<()> {
        let board = board_with_dishes().await?;
        let fields = DishArgs {
            name: Some("Samosa".to_string()),
            mrp: Some("100".to_string()),
            price: Some("120".to_string()),
            ..DishArgs::default()
        };
        let reply = add(&board, fields).await?;
        assert!(reply.starts_with("❌ Vendor price"));
        assert_eq!(board.items().await.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_with_oversized_image() -> Result<()> {
        let board = board_with_dishes().await?;
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&vec![0_u8; 2 * 1024 * 1024 + 1]).unwrap();
        let fields = DishArgs {
            name: Some("Idli".to_string()),
            price: Some("30".to_string()),
            image: Some(file.path().to_path_buf()),
            ..DishArgs::default()
        };
        let reply = add(&board, fields).await?;
        assert!(reply.starts_with("❌"), "{reply}");
        assert_eq!(board.items().await.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_refuses_mrp_change() -> Result<()> {
        let board = board_with_dishes().await?;
        let fields = DishArgs {
            mrp: Some("50".to_string()),
            ..DishArgs::default()
        };
        let reply = edit(&board, 1, fields).await?;
        assert!(reply.starts_with("❌"), "{reply}");

        let fields = DishArgs {
            price: Some("18".to_string()),
            description: Some("with ginger".to_string()),
            ..DishArgs::default()
        };
        assert_eq!(edit(&board, 1, fields).await?, "✅ Dish 'Tea' updated.");
        let tea = board.item(1).await.unwrap();
        assert_eq!(tea.vendor_price, dec!(18));
        assert_eq!(tea.description_text(), "With Ginger");

        let reply = edit(&board, 99, DishArgs::default()).await?;
        assert_eq!(reply, "❌ Dish not found: 99");
        Ok(())
    }

    #[tokio::test]
    async fn test_status_and_delete() -> Result<()> {
        let board = board_with_dishes().await?;
        let reply = status(&board, 2, StatusArg::Closed.into()).await?;
        assert_eq!(reply, "✅ 'Coffee' is now Closed.");

        let reply = delete(&board, 3).await?;
        assert_eq!(reply, "🗑️ 'Bun Maska' removed from the menu.");
        assert!(board.item(3).await.is_none());

        let reply = delete(&board, 3).await?;
        assert_eq!(reply, "❌ Dish not found: 3");
        Ok(())
    }
}
