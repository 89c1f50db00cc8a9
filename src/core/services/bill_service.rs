use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{find_named, DueDate, FinanceData, RecurringBill};

use super::{
    query::{matches_search, SortOrder},
    FieldErrors, ServiceError, ServiceResult,
};

const MAX_BILL_NAME_LEN: usize = 40;

/// Form input for creating or editing a recurring bill.
#[derive(Debug, Clone)]
pub struct BillDraft {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub due_date: DueDate,
    /// Marker color code or marker name.
    pub theme: String,
}

pub struct BillService;

impl BillService {
    pub fn add(data: &mut FinanceData, draft: BillDraft) -> ServiceResult<Uuid> {
        let theme = Self::validate(data, &draft)?;
        let bill = RecurringBill::new(
            draft.name.trim(),
            draft.category.trim(),
            draft.amount.abs(),
            draft.due_date,
            theme,
        );
        let id = bill.id;
        tracing::info!(name = %bill.name, amount = bill.amount, "recurring bill added");
        data.recurring_bills.push(bill);
        Ok(id)
    }

    pub fn edit(data: &mut FinanceData, id: Uuid, draft: BillDraft) -> ServiceResult<()> {
        if data.bill(id).is_none() {
            return Err(ServiceError::NotFound(format!("bill {}", id)));
        }
        let theme = Self::validate(data, &draft)?;
        let bill = data
            .bill_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("bill {}", id)))?;
        bill.name = draft.name.trim().to_string();
        bill.category = draft.category.trim().to_string();
        bill.amount = draft.amount.abs();
        bill.due_date = draft.due_date;
        bill.theme = theme;
        tracing::info!(%id, "recurring bill updated");
        Ok(())
    }

    pub fn remove(data: &mut FinanceData, id: Uuid) -> ServiceResult<RecurringBill> {
        let position = data
            .recurring_bills
            .iter()
            .position(|bill| bill.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("bill {}", id)))?;
        let removed = data.recurring_bills.remove(position);
        tracing::info!(name = %removed.name, "recurring bill removed");
        Ok(removed)
    }

    /// Records a payment; only a later date replaces the stored one.
    pub fn mark_paid(data: &mut FinanceData, id: Uuid, date: NaiveDate) -> ServiceResult<()> {
        let bill = data
            .bill_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("bill {}", id)))?;
        if bill.last_paid.map_or(true, |previous| date > previous) {
            bill.last_paid = Some(date);
        }
        tracing::info!(%id, %date, "recurring bill paid");
        Ok(())
    }

    pub fn find_by_name<'a>(data: &'a FinanceData, name: &str) -> Option<&'a RecurringBill> {
        find_named(&data.recurring_bills, name)
    }

    /// Filters bills by name and orders them; date-based orders use the due date for `today`.
    pub fn search<'a>(
        data: &'a FinanceData,
        needle: &str,
        sort: SortOrder,
        today: NaiveDate,
    ) -> Vec<&'a RecurringBill> {
        let mut bills: Vec<&RecurringBill> = data
            .recurring_bills
            .iter()
            .filter(|bill| matches_search(&bill.name, needle))
            .collect();
        bills.sort_by(|left, right| {
            sort.compare(
                (left.due_date.resolve(today), left.name.as_str(), left.magnitude()),
                (right.due_date.resolve(today), right.name.as_str(), right.magnitude()),
            )
        });
        bills
    }

    fn validate(data: &FinanceData, draft: &BillDraft) -> ServiceResult<String> {
        let mut errors = FieldErrors::new();
        errors.require_name("name", &draft.name, MAX_BILL_NAME_LEN);
        if data.category_named(draft.category.trim()).is_none() {
            errors.push(
                "category",
                format!("unknown category `{}`", draft.category.trim()),
            );
        }
        errors.require_finite("amount", draft.amount);
        if let DueDate::DayOfMonth(day) = draft.due_date {
            if !(1..=31).contains(&day) {
                errors.push("dueDate", "day of month must be between 1 and 31");
            }
        }
        let color = match data.marker(&draft.theme) {
            Some(marker) => marker.color_code.clone(),
            None => {
                errors.push("theme", format!("unknown theme `{}`", draft.theme.trim()));
                String::new()
            }
        };
        errors.finish()?;
        Ok(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, amount: f64, due: DueDate) -> BillDraft {
        BillDraft {
            name: name.into(),
            category: "Bills".into(),
            amount,
            due_date: due,
            theme: "Navy".into(),
        }
    }

    #[test]
    fn add_stores_magnitude_and_color() {
        let mut data = FinanceData::default();
        let id = BillService::add(&mut data, draft("Rent", -950.0, DueDate::DayOfMonth(1))).unwrap();
        let bill = data.bill(id).unwrap();
        assert_eq!(bill.amount, 950.0);
        assert_eq!(bill.theme, "#626070");
    }

    #[test]
    fn rejects_bad_due_day_and_missing_amount() {
        let mut data = FinanceData::default();
        let err = BillService::add(&mut data, draft("Rent", f64::NAN, DueDate::DayOfMonth(32)))
            .unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["amount", "dueDate"]);
        assert!(data.recurring_bills.is_empty());
    }

    #[test]
    fn zero_amount_is_a_valid_bill() {
        let mut data = FinanceData::default();
        let id = BillService::add(&mut data, draft("Trial", 0.0, DueDate::DayOfMonth(3))).unwrap();
        assert_eq!(data.bill(id).unwrap().amount, 0.0);

        let err = BillService::add(&mut data, draft("Promo", f64::INFINITY, DueDate::DayOfMonth(3)))
            .unwrap_err();
        assert_eq!(err.field_errors()[0].message, "must be a number");
    }

    #[test]
    fn mark_paid_keeps_latest_date() {
        let mut data = FinanceData::default();
        let id = BillService::add(&mut data, draft("Rent", 950.0, DueDate::DayOfMonth(1))).unwrap();
        let aug = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let jul = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        BillService::mark_paid(&mut data, id, aug).unwrap();
        BillService::mark_paid(&mut data, id, jul).unwrap();
        assert_eq!(data.bill(id).unwrap().last_paid, Some(aug));
    }

    #[test]
    fn search_sorts_by_due_day_and_amount() {
        let mut data = FinanceData::default();
        for (name, amount, day) in [("Rent", 950.0, 1), ("Gym", 30.0, 11), ("Grid", 100.0, 5)] {
            BillService::add(&mut data, draft(name, amount, DueDate::DayOfMonth(day))).unwrap();
        }
        let today = NaiveDate::from_ymd_opt(2024, 8, 19).unwrap();

        let oldest: Vec<_> = BillService::search(&data, "", SortOrder::Oldest, today)
            .iter()
            .map(|bill| bill.name.as_str())
            .collect();
        assert_eq!(oldest, ["Rent", "Grid", "Gym"]);

        let lowest: Vec<_> = BillService::search(&data, "g", SortOrder::Lowest, today)
            .iter()
            .map(|bill| bill.name.as_str())
            .collect();
        assert_eq!(lowest, ["Gym", "Grid"]);
    }

    #[test]
    fn missing_bill_is_not_found() {
        let mut data = FinanceData::default();
        let err = BillService::remove(&mut data, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
