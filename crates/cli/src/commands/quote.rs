//! Run a custom-product session from files.
//!
//! # Usage
//!
//! ```bash
//! lm-cli quote -d bowl.json -s picks.yaml -a addons.json --commit
//! ```
//!
//! # Selection script
//!
//! ```yaml
//! steps:
//!   1: [acai-500]
//!   2: [granola, banana]
//! quantity: 2
//! observation: no sugar
//! addons:
//!   50: 1
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use local_market_configurator::{
    CommitError, CustomProductSession, MemoryCart, Notifier, TracingNotifier,
};
use local_market_core::{
    AddonOffer, CurrencyCode, CustomProductDefinition, ItemKey, LoadError, Price, ProductId,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while quoting.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The definition file is malformed or invalid.
    #[error("Definition: {0}")]
    Definition(#[from] LoadError),

    /// The add-on offers file is malformed.
    #[error("Add-on offers: {0}")]
    Offers(#[from] serde_json::Error),

    /// The selection script is malformed.
    #[error("Selection script: {0}")]
    Script(#[from] serde_yaml::Error),

    /// The session refused to commit.
    #[error("Commit failed: {0}")]
    Commit(#[from] CommitError),
}

/// Shopper actions replayed against a session.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionScript {
    /// Items toggled per step, in order.
    pub steps: BTreeMap<u32, Vec<ItemKey>>,
    pub quantity: Option<u32>,
    pub observation: Option<String>,
    /// Add-on quantities by product ID.
    pub addons: BTreeMap<i32, u32>,
}

impl SelectionScript {
    /// Replay the script's actions against `session`.
    pub fn apply<N: Notifier>(&self, session: &mut CustomProductSession<N>) {
        for (step_number, keys) in &self.steps {
            for key in keys {
                session.toggle_item_selection(*step_number, key);
            }
        }
        if let Some(quantity) = self.quantity {
            session.set_quantity(quantity);
        }
        if let Some(observation) = &self.observation {
            session.set_observation(observation.clone());
        }
        for (product_id, quantity) in &self.addons {
            session.set_addon_quantity(ProductId::new(*product_id), *quantity);
        }
    }
}

async fn read(path: &Path) -> Result<String, QuoteError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| QuoteError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn brl(amount: rust_decimal::Decimal) -> Price {
    Price::new(amount, CurrencyCode::default())
}

/// Quote a custom product and optionally commit it to an in-memory cart.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, or if
/// `commit` is set and the session cannot be committed.
pub async fn run(
    definition_path: &Path,
    selections_path: &Path,
    addon_offers_path: Option<&Path>,
    commit: bool,
) -> Result<(), QuoteError> {
    let definition = CustomProductDefinition::from_json(&read(definition_path).await?)?;
    let script: SelectionScript = serde_yaml::from_str(&read(selections_path).await?)?;
    let offers: Vec<AddonOffer> = match addon_offers_path {
        Some(path) => serde_json::from_str(&read(path).await?)?,
        None => Vec::new(),
    };

    info!(
        custom_product_id = %definition.id,
        name = %definition.name,
        strategy = %definition.pricing_strategy,
        steps = definition.steps.len(),
        "Loaded definition"
    );

    let mut session = CustomProductSession::new(definition, TracingNotifier).with_addon_offers(offers);
    script.apply(&mut session);

    info!(state = ?session.state(), "Session state");
    for missing in session.incomplete_steps() {
        warn!(
            step = missing.step_number,
            name = %missing.name,
            remaining = missing.remaining,
            "Step incomplete"
        );
    }
    info!(
        unit_price = %brl(session.unit_price()),
        quantity = session.quantity(),
        total = %brl(session.total()),
        "Quote"
    );

    if commit {
        let mut cart = MemoryCart::new();
        let receipt = session.commit(&mut cart)?;
        for entry in cart.entries() {
            info!(
                line_item_id = %entry.id,
                name = %entry.item.name,
                quantity = entry.item.quantity,
                unit_price = %brl(entry.item.unit_price),
                parent = ?entry.item.parent_line_item_id,
                "Cart line"
            );
        }
        info!(
            line_item_id = %receipt.line_item_id,
            subtotal = %brl(cart.subtotal()),
            "Committed"
        );
    }

    Ok(())
}
