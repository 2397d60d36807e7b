use divdash_core::Controller;

use super::{gated, Body, CommandResult};
use crate::cli::Section;

pub fn add(controller: &mut Controller, ticker: &str, quantity: &str) -> CommandResult {
    let outcome = controller.add_entry(ticker, quantity);
    CommandResult::from_action(outcome, portfolio_body(controller))
}

pub fn remove(controller: &mut Controller, index: usize) -> CommandResult {
    let outcome = controller.remove_entry(index);
    CommandResult::from_action(outcome, portfolio_body(controller))
}

pub fn list(controller: &Controller) -> CommandResult {
    gated(controller).unwrap_or_else(|| CommandResult::new(portfolio_body(controller)))
}

fn portfolio_body(controller: &Controller) -> Body {
    Body::View(Box::new(controller.view()), Section::Portfolio)
}

#[cfg(test)]
mod tests {
    use divdash_core::Notice;

    use super::*;
    use crate::commands::test_support::controller;

    #[test]
    fn add_then_remove_keeps_order() {
        let mut controller = controller(true);
        add(&mut controller, "sber", "10");
        add(&mut controller, "gazp", "5");

        let result = remove(&mut controller, 0);

        assert_eq!(result.notices, vec![Notice::EntryRemoved]);
        let Body::View(view, Section::Portfolio) = result.body else {
            panic!("expected portfolio view");
        };
        assert_eq!(view.portfolio.len(), 1);
        assert_eq!(view.portfolio[0].ticker, "GAZP");
    }

    #[test]
    fn invalid_quantity_hides_the_body() {
        let mut controller = controller(true);
        let result = add(&mut controller, "SBER", "-1");
        assert_eq!(result.notices, vec![Notice::FillAllFields]);
        assert!(matches!(result.body, Body::Empty));
    }
}
