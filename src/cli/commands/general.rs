//! General commands - outlet profile and catalog listings.
//! Catalog listings need no backend at all.

use crate::{
    cli::{CatalogKind, commands::reply_error},
    core::{
        board::MenuBoard,
        catalog::{CatalogEntry, Cuisine, FoodType},
    },
    errors::Result,
};

/// Shows the outlet profile the backend holds for this board.
pub async fn outlet(board: &MenuBoard) -> Result<String> {
    match board.outlet().await {
        Ok(Some(outlet)) => {
            let name = outlet.outlet_name.as_deref().unwrap_or("Unnamed outlet");
            let dishes = board.stats().await.total;
            Ok(format!(
                "🏪 {name} (outlet #{})\n{dishes} dishes on the menu",
                outlet.outlet_id
            ))
        }
        Ok(None) => Ok(format!(
            "Outlet #{} has no profile on the backend.",
            board.outlet_id()
        )),
        Err(e) => reply_error(e),
    }
}

fn catalog_lines<T: CatalogEntry>() -> String {
    let mut lines = vec![format!("**{} tags**", T::KIND)];
    lines.extend(
        T::all()
            .into_iter()
            .map(|entry| format!("• {} - {}", entry.as_ref(), entry.label())),
    );
    lines.join("\n")
}

/// Lists every tag of a catalog with its display label.
#[must_use]
pub fn catalog(kind: CatalogKind) -> String {
    match kind {
        CatalogKind::Cuisines => catalog_lines::<Cuisine>(),
        CatalogKind::FoodTypes => catalog_lines::<FoodType>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::DishBackend,
        core::listing::StatusLifecycle,
        test_utils::{create_test_dish, setup_test_store},
    };
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[test]
    fn test_catalog_listing() {
        let cuisines = catalog(CatalogKind::Cuisines);
        assert!(cuisines.starts_with("**Cuisine tags**"));
        assert!(cuisines.contains("• SRI_LANKAN - Sri Lankan"));
        assert_eq!(cuisines.lines().count(), 33);

        let food_types = catalog(CatalogKind::FoodTypes);
        assert!(food_types.contains("• MOUTH_FRESHENER_DIGESTIVE - Mouth Freshener Digestive"));
    }

    #[tokio::test]
    async fn test_outlet_from_local_store() -> Result<()> {
        let store = setup_test_store().await?;
        let backend: Arc<dyn DishBackend> = Arc::new(store.clone());

        let board = MenuBoard::load(Arc::clone(&backend), 4, StatusLifecycle::ThreeState).await?;
        assert_eq!(
            outlet(&board).await?,
            "Outlet #4 has no profile on the backend."
        );

        create_test_dish(&store, 4, "Poha", dec!(25)).await?;
        let board = MenuBoard::load(backend, 4, StatusLifecycle::ThreeState).await?;
        assert_eq!(
            outlet(&board).await?,
            "🏪 Unnamed outlet (outlet #4)\n1 dishes on the menu"
        );
        Ok(())
    }
}
