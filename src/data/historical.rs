use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::models::HistoricalAirdrop;

// (name, value in USD, distribution month)
const RAW_AIRDROPS: &[(&str, &str, &str)] = &[
    ("Uniswap", "$6,432,614,493", "Sep 2020"),
    ("Apecoin", "$3,544,345,703", "Mar 2022"),
    ("dYdX", "$2,009,935,493", "Sep 2021"),
    ("Arbitrum", "$1,969,296,101", "Mar 2023"),
    ("Ethereum Name Service", "$1,878,605,813", "Nov 2021"),
    ("Internet Computer", "$1,737,391,583", "May 2021"),
    ("Bonk", "$1,325,428,015", "Dec 2023"),
    ("Celestia", "$728,380,235", "Oct 2023"),
    ("LooksRare", "$712,335,336", "Jan 2022"),
    ("1inch Network (Airdrop 1)", "$670,872,722", "Dec 2020"),
    ("Optimism (Airdrop 1)", "$666,493,792", "May 2022"),
    ("Blur (Airdrop 1)", "$446,197,003", "Feb 2023"),
    ("Aptos", "$431,977,140", "Oct 2022"),
    ("Loot", "$387,786,055", "Sep 2021"),
    ("Blur (Airdrop 2)", "$371,830,836", "Nov 2023"),
    ("Jito", "$311,634,115", "Dec 2023"),
    ("Gitcoin", "$283,807,338", "May 2021"),
    ("ParaSwap", "$232,604,859", "Nov 2021"),
    ("Tornado Cash", "$204,072,778", "May 2021"),
    ("CoW Protocol", "$193,484,442", "Mar 2022"),
    ("WorldCoin", "$181,911,990", "Jul 2023"),
    ("Aidoge", "$174,850,390", "May 2023"),
    ("The Graph", "$172,286,023", "Dec 2020"),
    ("Memecoin", "$146,564,771", "Nov 2023"),
    ("HashFlow", "$144,334,654", "Nov 2022"),
    ("ZigZag", "$139,767,571", "Jun 2023"),
    ("Instadapp", "$138,611,088", "Jun 2021"),
    ("Ribbon Finance", "$132,370,223", "May 2022"),
    ("Pyth Finance", "$124,533,425", "Nov 2023"),
    ("1inch Network (Airdrop 2)", "$111,812,120", "Sep 2021"),
    ("Botto", "$111,695,841", "Oct 2021"),
    ("Dogechain", "$95,542,882", "Aug 2022"),
    ("Galxe", "$62,420,883", "May 2022"),
    ("Optimism (Airdrop 3)", "$60,240,246", "Sep 2023"),
    ("Bank (Airdrop 1)", "$46,784,703", "Apr 2021"),
    ("Space ID", "$44,391,466", "Mar 2023"),
    ("Sweat", "$38,863,539", "Sep 2022"),
    ("Optimism (Airdrop 2)", "$36,440,485", "Feb 2023"),
    ("CyberConnect", "$28,358,596", "Aug 2023"),
    ("Arkham", "$18,983,672", "Jul 2023"),
    ("Maverick Protocol", "$15,688,404", "Jun 2023"),
    ("Notional Finance", "$14,846,311", "Nov 2021"),
    ("Unlock Protocol", "$14,802,806", "Mar 2022"),
    ("Forefront", "$14,799,284", "Mar 2021"),
    ("Bank (Airdrop 2)", "$13,567,564", "Nov 2021"),
    ("Hop Protocol", "$12,454,044", "Jun 2022"),
    ("Index Cooperative", "$6,703,150", "Oct 2020"),
    ("Spectra", "$3,188,386", "Apr 2023"),
    ("Snowswap", "$2,307,087", "Sep 2020"),
    ("DappRadar", "$500,814", "Dec 2021"),
];

pub struct AirdropStats {
    pub peak_timing: &'static str,
    pub allocation_range: &'static str,
    pub total_value_distributed: &'static str,
}

pub const AIRDROP_STATS: AirdropStats = AirdropStats {
    peak_timing: "46% of major airdrops saw their token price peak within 2 weeks of launch.",
    allocation_range: "Most protocols allocate between 5% and 15% of their total token supply to airdrops.",
    total_value_distributed: "The top 50 airdrops distributed over $26.6 billion in tokens between 2020 and 2023.",
};

/// Strips everything but digits, sign and decimal point; unparseable input is zero.
pub fn parse_usd(value: &str) -> Decimal {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Parses a "Mon YYYY" label to the first day of that month.
pub fn parse_month(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {}", label.trim()), "%d %b %Y").ok()
}

/// The 50 largest historical airdrops, ranked by value descending.
pub fn historical_airdrops() -> &'static [HistoricalAirdrop] {
    static TABLE: OnceLock<Vec<HistoricalAirdrop>> = OnceLock::new();

    TABLE.get_or_init(|| {
        let mut entries: Vec<HistoricalAirdrop> = RAW_AIRDROPS
            .iter()
            .map(|(name, value, date)| HistoricalAirdrop {
                rank: 0,
                name: name.to_string(),
                value_raw: parse_usd(value),
                date: parse_month(date),
            })
            .collect();

        entries.sort_by(|a, b| b.value_raw.cmp(&a.value_raw));
        for (idx, entry) in entries.iter_mut().enumerate() {
            entry.rank = idx as u32 + 1;
        }
        entries
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ranked_descending() {
        let table = historical_airdrops();
        assert_eq!(table.len(), 50);
        assert_eq!(table[0].name, "Uniswap");
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[49].name, "DappRadar");
        assert!(table.windows(2).all(|w| w[0].value_raw >= w[1].value_raw));
        assert!(table.iter().all(|e| e.date.is_some()));
    }

    #[test]
    fn test_parse_usd() {
        assert_eq!(parse_usd("$6,432,614,493"), Decimal::from(6_432_614_493u64));
        assert_eq!(parse_usd("$1,234.50"), Decimal::from_str("1234.50").unwrap());
        assert_eq!(parse_usd(""), Decimal::ZERO);
        assert_eq!(parse_usd("n/a"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("Sep 2020"), NaiveDate::from_ymd_opt(2020, 9, 1));
        assert_eq!(parse_month("Sometime"), None);
    }
}
