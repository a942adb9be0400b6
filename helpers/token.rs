//! Token identity: name, symbol, decimals and scaled supply

use num::{BigUint, ToPrimitive};
use rand::{seq::IndexedRandom, Rng};

use crate::{
    error::DeployError,
    words::{ADJECTIVES, NAMES},
};

/// Human-facing description of the token being deployed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Supply in base units, `total_supply * 10^decimals`
    pub supply: BigUint,
}

impl TokenIdentity {
    /// Fill in whatever the caller left out.
    ///
    /// A missing name is generated from the word lists. A missing symbol is
    /// taken from the initials of the resolved name.
    pub fn resolve<R: Rng + ?Sized>(
        name: Option<&str>,
        symbol: Option<&str>,
        decimals: u8,
        total_supply: &BigUint,
        rng: &mut R,
    ) -> Self {
        let name = match name {
            Some(name) => name.to_owned(),
            None => generate_name(rng),
        };
        let symbol = match symbol {
            Some(symbol) => symbol.to_owned(),
            None => initials(&name),
        };

        Self {
            name,
            symbol,
            decimals,
            supply: scaled_supply(total_supply, decimals),
        }
    }

    /// Narrow the supply to the chain's `Balance` type
    pub fn supply_as_balance(&self) -> Result<u128, DeployError> {
        self.supply
            .to_u128()
            .ok_or_else(|| DeployError::SupplyOverflow(self.supply.clone()))
    }
}

/// Random "Adjective Name" pair, e.g. "Quiet Astrid"
pub fn generate_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("quiet");
    let name = NAMES.choose(rng).copied().unwrap_or("Fox");
    format!("{} {}", capitalize(adjective), name)
}

/// Uppercase first letter of every word: "Quiet Fox" -> "QF"
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn scaled_supply(total_supply: &BigUint, decimals: u8) -> BigUint {
    total_supply * BigUint::from(10u32).pow(u32::from(decimals))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn supply_is_scaled_by_decimals() {
        let one = BigUint::from(1u32);
        assert_eq!(
            scaled_supply(&one, 18),
            BigUint::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(scaled_supply(&BigUint::from(5u32), 2), BigUint::from(500u32));
        assert_eq!(scaled_supply(&BigUint::from(7u32), 0), BigUint::from(7u32));
    }

    #[test]
    fn supply_does_not_overflow_for_large_decimals() {
        let supply = scaled_supply(&BigUint::from(3u32), 60);
        let expected: BigUint = format!("3{}", "0".repeat(60)).parse().unwrap();
        assert_eq!(supply, expected);
    }

    #[test]
    fn balance_conversion_rejects_oversized_supply() {
        let mut rng = StdRng::seed_from_u64(1);
        let token =
            TokenIdentity::resolve(Some("Big Coin"), None, 40, &BigUint::from(1u32), &mut rng);
        assert!(matches!(
            token.supply_as_balance(),
            Err(DeployError::SupplyOverflow(_))
        ));

        let token =
            TokenIdentity::resolve(Some("Big Coin"), None, 18, &BigUint::from(1u32), &mut rng);
        assert_eq!(token.supply_as_balance().unwrap(), 10u128.pow(18));
    }

    #[test]
    fn generated_names_are_two_words() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let name = generate_name(&mut rng);
            let words: Vec<&str> = name.split(' ').collect();
            assert_eq!(words.len(), 2, "unexpected name {name:?}");
            assert!(words.iter().all(|w| !w.is_empty()));
            assert!(words[0].chars().next().unwrap().is_uppercase());
        }
    }

    #[test]
    fn dictionaries_hold_single_words() {
        for word in ADJECTIVES.iter().chain(NAMES) {
            assert!(!word.is_empty());
            assert!(!word.contains(char::is_whitespace), "{word:?}");
        }
    }

    #[test]
    fn symbol_is_initials_of_name() {
        assert_eq!(initials("Quiet Fox"), "QF");
        assert_eq!(initials("nervous Amalea"), "NA");
        assert_eq!(initials("  spaced   out  words "), "SOW");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn resolve_uses_supplied_name_and_derives_symbol() {
        let mut rng = StdRng::seed_from_u64(3);
        let token =
            TokenIdentity::resolve(Some("Quiet Fox"), None, 2, &BigUint::from(5u32), &mut rng);
        assert_eq!(token.name, "Quiet Fox");
        assert_eq!(token.symbol, "QF");
        assert_eq!(token.decimals, 2);
        assert_eq!(token.supply, BigUint::from(500u32));
    }

    #[test]
    fn resolve_prefers_explicit_symbol() {
        let mut rng = StdRng::seed_from_u64(3);
        let token = TokenIdentity::resolve(
            Some("Quiet Fox"),
            Some("QFX"),
            18,
            &BigUint::from(1u32),
            &mut rng,
        );
        assert_eq!(token.symbol, "QFX");
    }

    #[test]
    fn resolve_generates_name_when_missing() {
        let mut rng = StdRng::seed_from_u64(9);
        let token = TokenIdentity::resolve(None, None, 18, &BigUint::from(1u32), &mut rng);
        assert_eq!(token.name.split(' ').count(), 2);
        assert_eq!(token.symbol, initials(&token.name));
        assert_eq!(token.symbol.chars().count(), 2);
    }
}
