use anyhow::{Context, Result, bail};

/// Resolve CLI seed tokens into unique seeds, preserving first-seen order.
///
/// Accepts decimal integers and `0x`-prefixed hexadecimal.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();

    for token in tokens {
        let seed = parse_seed(token)?;
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }

    if seeds.is_empty() {
        bail!("no seeds provided");
    }
    Ok(seeds)
}

fn parse_seed(token: &str) -> Result<u64> {
    let trimmed = token.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hexadecimal seed '{trimmed}'"));
    }
    trimmed
        .parse::<u64>()
        .with_context(|| format!("invalid seed '{trimmed}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn numeric_and_hex_seeds_resolve() {
        let seeds = resolve_seed_inputs(&tokens(&["1337", "0x10", "0XFF"])).unwrap();
        assert_eq!(seeds, vec![1337, 16, 255]);
    }

    #[test]
    fn duplicates_are_dropped() {
        let seeds = resolve_seed_inputs(&tokens(&["7", "0x7", "8", "7"])).unwrap();
        assert_eq!(seeds, vec![7, 8]);
    }

    #[test]
    fn invalid_tokens_are_errors() {
        let err = resolve_seed_inputs(&tokens(&["orange"])).unwrap_err();
        assert!(err.to_string().contains("invalid seed 'orange'"));
        assert!(resolve_seed_inputs(&tokens(&["0xZZ"])).is_err());
        assert!(resolve_seed_inputs(&[]).is_err());
    }
}
