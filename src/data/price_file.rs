use {
    anyhow::{Context, Result, bail},
    std::fs::File,
    std::io::{BufReader, Read},
    std::path::Path,
};

/// Reads a price file: a JSON array, or numbers separated by commas, whitespace or newlines.
pub fn load_prices(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path).with_context(|| format!("Failed to open price file {}", path.display()))?;
    let mut text = String::new();
    BufReader::new(file)
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read price file {}", path.display()))?;
    parse_prices(&text).with_context(|| format!("Bad price data in {}", path.display()))
}

pub fn parse_prices(text: &str) -> Result<Vec<f64>> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        let prices: Vec<f64> = serde_json::from_str(trimmed).context("Invalid JSON price array")?;
        return Ok(prices);
    }

    let prices = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .with_context(|| format!("Value {} ('{}') is not a number", i + 1, token))
        })
        .collect::<Result<Vec<f64>>>()?;

    if prices.is_empty() {
        bail!("No prices found");
    }
    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_lines_commas_and_json() {
        assert_eq!(parse_prices("100\n101.5\n 99\n").unwrap(), vec![100.0, 101.5, 99.0]);
        assert_eq!(parse_prices("1, 2,3").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_prices("[4.0, 5]").unwrap(), vec![4.0, 5.0]);
    }

    #[test]
    fn rejects_junk() {
        let err = parse_prices("1, two, 3").unwrap_err();
        assert!(err.to_string().contains("'two'"));
        assert!(parse_prices("  \n ").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "100\n101\n99").unwrap();
        assert_eq!(load_prices(file.path()).unwrap(), vec![100.0, 101.0, 99.0]);
        assert!(load_prices(Path::new("/no/such/prices.txt")).is_err());
    }
}
