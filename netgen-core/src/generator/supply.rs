//! Splits the total supply across the sources.

use super::context::GenerationContext;

/// Gives every source a random share of `SUPPLY / SOURCES`, handing the rest
/// of that share to a random source, then drops the division remainder on
/// one more random source. The total is preserved exactly.
pub(super) fn distribute(context: &mut GenerationContext<'_>) {
    let params = context.params;
    let per_source = params.supply / params.sources;
    for source in 1..=params.sources {
        let partial = context.rng.next_in(1, per_source);
        context.add_balance(source, partial);
        let other = context.rng.next_in(0, params.sources - 1) + 1;
        context.add_balance(other, per_source - partial);
    }
    let lucky = context.rng.next_in(0, params.sources - 1) + 1;
    context.add_balance(lucky, params.supply % params.sources);
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::params::GenerationParams;

    #[rstest]
    #[case(1, 1, 1)]
    #[case(7, 3, 100)]
    #[case(99, 5, 10_001)]
    #[case(4, 52, 10_000)]
    fn preserves_total_supply(#[case] seed: i64, #[case] sources: i64, #[case] supply: i64) {
        let params = GenerationParams {
            seed,
            sources,
            supply,
            ..GenerationParams::default()
        };
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        distribute(&mut context);
        let balances: Vec<i64> = (1..=params.nodes).map(|node| context.balance(node)).collect();
        assert_eq!(balances.iter().sum::<i64>(), supply);
        let (sources_part, rest) = balances.split_at(usize::try_from(sources).unwrap_or(0));
        assert!(sources_part.iter().all(|&balance| balance > 0));
        assert!(rest.iter().all(|&balance| balance == 0));
    }
}
