//! Delimited-text tokenizing for bulk loads.

/// Split `content` into rows of fields. Line endings may be `\n` or `\r\n`.
pub fn parse_delimited(content: &str, delimiter: char) -> Vec<Vec<String>> {
    content
        .lines()
        .map(|line| parse_delimited_line(line, delimiter))
        .collect()
}

/// Parse a single line, handling quoted fields and doubled quotes.
/// Unquoted fields are trimmed; quoted fields keep their whitespace.
pub fn parse_delimited_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
            field_was_quoted = true;
        } else if c == delimiter {
            fields.push(finish_field(std::mem::take(&mut current), field_was_quoted));
            field_was_quoted = false;
        } else {
            current.push(c);
        }
    }
    fields.push(finish_field(current, field_was_quoted));
    fields
}

fn finish_field(field: String, quoted: bool) -> String {
    if quoted {
        field
    } else {
        field.trim().to_string()
    }
}

/// Parse a `--delimiter` argument: one character, or `\t` / `tab`.
pub fn parse_delimiter(arg: &str) -> Option<char> {
    match arg {
        "\\t" | "tab" => Some('\t'),
        _ => {
            let mut chars = arg.chars();
            let c = chars.next()?;
            if chars.next().is_some() || c == '"' {
                return None;
            }
            Some(c)
        }
    }
}
