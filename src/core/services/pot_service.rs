//! Savings pots: CRUD plus moving money between the balance and a pot.
//!
//! Like budgets, validation relies on reconciled `used_in_pots` flags.

use uuid::Uuid;

use crate::domain::{find_named, names_match, FinanceData, Pot};

use super::{FieldErrors, ServiceError, ServiceResult};

pub const MAX_POT_NAME_LEN: usize = 30;

/// Form input for creating or editing a pot.
#[derive(Debug, Clone)]
pub struct PotDraft {
    pub name: String,
    pub target: f64,
    /// Marker color code or marker name.
    pub theme: String,
}

pub struct PotService;

impl PotService {
    pub fn add(data: &mut FinanceData, draft: PotDraft) -> ServiceResult<Uuid> {
        let theme = Self::validate(data, None, &draft)?;
        let pot = Pot::new(draft.name.trim(), draft.target, theme);
        let id = pot.id;
        tracing::info!(name = %pot.name, target = pot.target, "pot added");
        data.pots.push(pot);
        Ok(id)
    }

    pub fn edit(data: &mut FinanceData, id: Uuid, draft: PotDraft) -> ServiceResult<()> {
        let current = data
            .pot(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("pot {}", id)))?;
        let theme = Self::validate(data, Some(&current), &draft)?;
        let pot = data
            .pot_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("pot {}", id)))?;
        pot.name = draft.name.trim().to_string();
        pot.target = draft.target;
        pot.theme = theme;
        tracing::info!(%id, "pot updated");
        Ok(())
    }

    /// Removes the pot and returns whatever it held to the current balance.
    pub fn remove(data: &mut FinanceData, id: Uuid) -> ServiceResult<Pot> {
        let position = data
            .pots
            .iter()
            .position(|pot| pot.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("pot {}", id)))?;
        let removed = data.pots.remove(position);
        data.balance.current += removed.total;
        tracing::info!(name = %removed.name, returned = removed.total, "pot removed");
        Ok(removed)
    }

    /// Moves `amount` from the current balance into the pot.
    pub fn deposit(data: &mut FinanceData, id: Uuid, amount: f64) -> ServiceResult<f64> {
        let available = data.balance.current;
        let mut errors = FieldErrors::new();
        errors.require_positive("amount", amount);
        if amount.is_finite() && amount > available {
            errors.push(
                "amount",
                format!("only {:.2} available in the current balance", available),
            );
        }
        let pot = data
            .pot_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("pot {}", id)))?;
        errors.finish()?;
        pot.total += amount;
        let total = pot.total;
        data.balance.current -= amount;
        tracing::info!(%id, amount, total, "money added to pot");
        Ok(total)
    }

    /// Moves `amount` from the pot back into the current balance.
    pub fn withdraw(data: &mut FinanceData, id: Uuid, amount: f64) -> ServiceResult<f64> {
        let pot = data
            .pot_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("pot {}", id)))?;
        let mut errors = FieldErrors::new();
        errors.require_positive("amount", amount);
        if amount.is_finite() && amount > pot.total {
            errors.push("amount", format!("only {:.2} saved in {}", pot.total, pot.name));
        }
        errors.finish()?;
        pot.total -= amount;
        let total = pot.total;
        data.balance.current += amount;
        tracing::info!(%id, amount, total, "money withdrawn from pot");
        Ok(total)
    }

    pub fn find_by_name<'a>(data: &'a FinanceData, name: &str) -> Option<&'a Pot> {
        find_named(&data.pots, name)
    }

    pub fn total_saved(data: &FinanceData) -> f64 {
        data.pots.iter().map(|pot| pot.total).sum()
    }

    fn validate(data: &FinanceData, current: Option<&Pot>, draft: &PotDraft) -> ServiceResult<String> {
        let mut errors = FieldErrors::new();
        errors.require_name("name", &draft.name, MAX_POT_NAME_LEN);
        let duplicate = data.pots.iter().any(|pot| {
            names_match(&pot.name, &draft.name) && current.map_or(true, |own| own.id != pot.id)
        });
        if duplicate {
            errors.push("name", format!("a pot named `{}` already exists", draft.name.trim()));
        }

        errors.require_positive("target", draft.target);

        let mut color = String::new();
        match data.marker(&draft.theme) {
            None => errors.push("theme", format!("unknown theme `{}`", draft.theme.trim())),
            Some(marker) => {
                let own = current.is_some_and(|pot| marker.matches(&pot.theme));
                if marker.used_in_pots && !own {
                    errors.push(
                        "theme",
                        format!("{} is already used by another pot", marker.name),
                    );
                }
                color = marker.color_code.clone();
            }
        }

        errors.finish()?;
        Ok(color)
    }
}
