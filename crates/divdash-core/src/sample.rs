//! Fixed sample listings used for offline demos and the refresh fallback.
//!
//! Both lists come back ranked the same way live listings are: highest
//! yield first, at most [`TOP_N`] rows.

use crate::domain::{BondRecord, StockRecord, TOP_N};

pub fn sample_stocks() -> Vec<StockRecord> {
    let mut stocks = vec![
        StockRecord::new("SBER", 250.50, 8.5, "20.12.2023", 21.3),
        StockRecord::new("GAZP", 158.20, 9.2, "15.01.2024", 14.6),
        StockRecord::new("LKOH", 5840.00, 7.8, "10.12.2023", 455.5),
        StockRecord::new("MGNT", 5420.50, 6.3, "05.02.2024", 341.5),
        StockRecord::new("VTBR", 0.0425, 10.1, "25.12.2023", 0.0043),
        StockRecord::new("ROSN", 485.30, 8.9, "18.01.2024", 43.2),
        StockRecord::new("NLMK", 182.40, 7.5, "12.12.2023", 13.7),
        StockRecord::new("TATN", 385.60, 9.5, "22.01.2024", 36.6),
        StockRecord::new("MOEX", 145.80, 6.8, "08.02.2024", 9.9),
        StockRecord::new("GMKN", 24850.00, 8.2, "30.12.2023", 2037.7),
    ];
    stocks.sort_by(|a, b| b.dividend_yield.total_cmp(&a.dividend_yield));
    stocks.truncate(TOP_N);
    stocks
}

pub fn sample_bonds() -> Vec<BondRecord> {
    let mut bonds = vec![
        BondRecord::new("ОФЗ-26240", 980.50, 8.2, "15.05.2033", 80.4),
        BondRecord::new("ОФЗ-26235", 995.20, 7.8, "17.11.2030", 77.6),
        BondRecord::new("ОФЗ-26230", 972.80, 8.5, "22.03.2036", 82.7),
        BondRecord::new("ОФЗ-26225", 1001.50, 7.5, "10.09.2028", 75.1),
        BondRecord::new("ОФЗ-26220", 987.60, 8.1, "05.12.2034", 80.0),
        BondRecord::new("ОФЗ-26215", 979.30, 8.3, "18.07.2032", 81.3),
        BondRecord::new("ОФЗ-26210", 992.40, 7.9, "25.01.2029", 78.4),
        BondRecord::new("ОФЗ-26205", 983.70, 8.2, "14.08.2031", 80.7),
        BondRecord::new("ОФЗ-26200", 976.90, 8.4, "30.04.2035", 82.1),
        BondRecord::new("ОФЗ-26195", 989.50, 7.7, "12.10.2027", 76.2),
    ];
    bonds.sort_by(|a, b| b.yield_pct.total_cmp(&a.yield_pct));
    bonds.truncate(TOP_N);
    bonds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_lists_fit_top_n() {
        assert_eq!(sample_stocks().len(), TOP_N);
        assert_eq!(sample_bonds().len(), TOP_N);
    }

    #[test]
    fn sample_lists_are_ranked_by_yield() {
        let stocks = sample_stocks();
        assert!(stocks
            .windows(2)
            .all(|pair| pair[0].dividend_yield >= pair[1].dividend_yield));
        assert_eq!(stocks[0].ticker, "VTBR");
        assert_eq!(stocks[TOP_N - 1].ticker, "MGNT");

        let bonds = sample_bonds();
        assert!(bonds.windows(2).all(|pair| pair[0].yield_pct >= pair[1].yield_pct));
        assert_eq!(bonds[0].ticker, "ОФЗ-26230");
        assert_eq!(bonds[TOP_N - 1].ticker, "ОФЗ-26225");
    }
}
