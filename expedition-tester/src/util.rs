use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn parse_seeds(s: &str) -> Result<Vec<u64>> {
    split_csv(s)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_tokens_are_trimmed_and_blanks_dropped() {
        assert_eq!(split_csv(" smoke, ,all-wrong,"), vec!["smoke", "all-wrong"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn seeds_must_be_numbers() {
        assert_eq!(parse_seeds("1, 2,42").unwrap(), vec![1, 2, 42]);
        let err = parse_seeds("7,maple").unwrap_err();
        assert!(err.to_string().contains("maple"));
    }
}
