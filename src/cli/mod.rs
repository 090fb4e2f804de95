//! Command-line interface - argument parsing and command dispatch
//!
//! Each sub-command maps to one dashboard action. Commands return the reply text
//! instead of printing it, so they can be exercised directly in tests.

/// Command implementations (dishes, outlet, catalogs)
pub mod commands;

use crate::{
    core::{
        board::MenuBoard,
        catalog::{Cuisine, FoodType},
        dish::{DishStatus, ItemId, OutletId},
        listing::{CategoryFilter, SortKey},
    },
    errors::Result,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, str::FromStr};

/// Menu administration for a restaurant outlet.
#[derive(Debug, Parser)]
#[command(name = "menu-desk", version, about)]
pub struct Cli {
    /// Settings file (defaults to ./menu-desk.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Outlet to administer, overriding the settings
    #[arg(long, global = true)]
    pub outlet: Option<OutletId>,

    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Available actions
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the menu, optionally filtered and sorted
    List(ListArgs),
    /// Create a dish
    Add(DishArgs),
    /// Edit a dish (the MRP cannot change)
    Edit {
        /// Dish to edit
        id: ItemId,
        /// Fields to change
        #[command(flatten)]
        fields: DishArgs,
    },
    /// Change a dish's availability
    Status {
        /// Dish to change
        id: ItemId,
        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Remove a dish from the menu
    Delete {
        /// Dish to remove
        id: ItemId,
    },
    /// Show the outlet profile
    Outlet,
    /// List the tags of a catalog
    Catalog {
        /// Which catalog
        #[arg(value_enum)]
        kind: CatalogKind,
    },
}

/// Listing options
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text to find in names and descriptions
    #[arg(long, short)]
    pub search: Option<String>,

    /// Cuisine tag, or "all"
    #[arg(long, default_value = "all")]
    pub cuisine: CategoryFilter<Cuisine>,

    /// Food type tag, or "all"
    #[arg(long = "food-type", default_value = "all")]
    pub food_type: CategoryFilter<FoodType>,

    /// name, price, cuisine or status
    #[arg(long, default_value = "name")]
    pub sort: SortKey,

    /// Print the headline numbers above the listing
    #[arg(long)]
    pub stats: bool,
}

/// Dish fields; anything omitted keeps its current (or default) value
#[derive(Debug, Clone, Default, Args)]
pub struct DishArgs {
    /// Dish name
    #[arg(long)]
    pub name: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// MRP; defaults to the selling price on creation
    #[arg(long)]
    pub mrp: Option<String>,

    /// Selling price
    #[arg(long)]
    pub price: Option<String>,

    /// Initial or new status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Opening time, HH:MM
    #[arg(long)]
    pub opens: Option<String>,

    /// Closing time, HH:MM
    #[arg(long)]
    pub closes: Option<String>,

    /// Vegetarian (true/false)
    #[arg(long)]
    pub veg: Option<bool>,

    /// Cuisine tag, e.g. SOUTH_INDIAN
    #[arg(long, value_parser = parse_tag::<Cuisine>)]
    pub cuisine: Option<Cuisine>,

    /// Food type tag, e.g. BREAKFAST
    #[arg(long = "food-type", value_parser = parse_tag::<FoodType>)]
    pub food_type: Option<FoodType>,

    /// Sold only in bulk (true/false)
    #[arg(long = "bulk-only")]
    pub bulk_only: Option<bool>,

    /// Picture file (at most 2 MiB)
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Statuses an owner can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Orderable
    Active,
    /// Temporarily closed
    Closed,
    /// Hidden from customers
    Inactive,
}

impl From<StatusArg> for DishStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => Self::Active,
            StatusArg::Closed => Self::Closed,
            StatusArg::Inactive => Self::Inactive,
        }
    }
}

/// Catalog selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    /// Cuisines
    Cuisines,
    /// Food types
    FoodTypes,
}

fn parse_tag<T: FromStr>(raw: &str) -> std::result::Result<T, String> {
    T::from_str(&raw.trim().to_ascii_uppercase()).map_err(|_| format!("unknown tag '{raw}'"))
}

/// Runs a command that needs the menu board.
pub async fn run(command: Command, board: &MenuBoard) -> Result<String> {
    match command {
        Command::List(args) => commands::dish::list(board, &args).await,
        Command::Add(fields) => commands::dish::add(board, fields).await,
        Command::Edit { id, fields } => commands::dish::edit(board, id, fields).await,
        Command::Status { id, status } => commands::dish::status(board, id, status.into()).await,
        Command::Delete { id } => commands::dish::delete(board, id).await,
        Command::Outlet => commands::general::outlet(board).await,
        Command::Catalog { kind } => Ok(commands::general::catalog(kind)),
    }
}
