use std::collections::BTreeMap;

use super::Expense;

/// Per-category totals plus the grand total across every expense.
///
/// Categories iterate in name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub by_category: BTreeMap<String, f64>,
    pub total: f64,
}

impl Summary {
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let mut summary = Summary::default();
        for expense in expenses {
            *summary
                .by_category
                .entry(expense.category.clone())
                .or_insert(0.0) += expense.amount;
            summary.total += expense.amount;
        }
        summary
    }

    pub fn category_total(&self, category: &str) -> Option<f64> {
        self.by_category.get(category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_amounts_by_category() {
        let expenses = vec![
            Expense::new("Coffee", 4.5, "Food"),
            Expense::new("Bus", 2.0, "Transport"),
            Expense::new("Lunch", 12.0, "Food"),
        ];
        let summary = Summary::from_expenses(&expenses);
        assert_eq!(summary.category_total("Food"), Some(16.5));
        assert_eq!(summary.category_total("Transport"), Some(2.0));
        assert_eq!(summary.total, 18.5);
        let names: Vec<&str> = summary.by_category.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Food", "Transport"]);
    }

    #[test]
    fn categories_are_case_sensitive() {
        let expenses = vec![
            Expense::new("Tea", 3.0, "food"),
            Expense::new("Cake", 5.0, "Food"),
        ];
        let summary = Summary::from_expenses(&expenses);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.total, 8.0);
    }

    #[test]
    fn empty_input_gives_zero_total() {
        let summary = Summary::from_expenses(&Vec::<Expense>::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
    }
}
