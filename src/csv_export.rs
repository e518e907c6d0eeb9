use csv::{QuoteStyle, WriterBuilder};

pub fn quoted_csv<I, R>(header: &[&str], rows: I) -> Result<String, csv::Error>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(std::io::Error::other(err.error().to_string())))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_is_quoted() {
        let text = quoted_csv(
            &["ID", "Name"],
            vec![vec!["1".to_string(), "Ann \"A\"".to_string()]],
        )
        .unwrap();
        assert_eq!(text, "\"ID\",\"Name\"\n\"1\",\"Ann \"\"A\"\"\"");
    }
}
