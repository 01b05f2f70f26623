/// Field separator for catalogue records.
pub const DELIMITER: char = ',';

const QUOTE: char = '"';

/// Split one record line into its fields.
///
/// Double-quoted sections may contain the delimiter; a doubled quote (`""`)
/// inside a quoted section is a literal quote. Structural quotes are consumed
/// by the scan, so a decoded field is only trimmed afterwards and quotes that
/// came from `""` are kept.
///
/// Never fails: an unterminated quote swallows the rest of the line into the
/// current field.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                field.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }

    fields.push(field.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields() {
        assert_eq!(
            parse_line("1,Title,Artist,words,happy"),
            vec!["1", "Title", "Artist", "words", "happy"]
        );
    }

    #[test]
    fn quoted_delimiter_is_kept() {
        let f = parse_line(r#"1,"Song, Title",Artist,"Some lyrics",happy"#);
        assert_eq!(f.len(), 5);
        assert_eq!(f[1], "Song, Title");
        assert_eq!(f[3], "Some lyrics");
    }

    #[test]
    fn doubled_quote_decodes_to_one() {
        let f = parse_line(r#"2,Title,Artist,"She said ""hi""",sad"#);
        assert_eq!(f[3], r#"She said "hi""#);
    }

    #[test]
    fn field_of_only_escaped_quotes_keeps_them() {
        let f = parse_line(r#"1,"""Heroes""",Bowie,x,happy"#);
        assert_eq!(f, vec!["1", "\"Heroes\"", "Bowie", "x", "happy"]);
        assert_eq!(parse_line("\"\"\"\"\"\""), vec!["\"\""]);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let f = parse_line(r#" 3 ,  "Padded"  , Artist ,, calm "#);
        assert_eq!(f, vec!["3", "Padded", "Artist", "", "calm"]);
    }

    #[test]
    fn empty_quoted_field() {
        let f = parse_line(r#"4,"",Artist,"",angry"#);
        assert_eq!(f, vec!["4", "", "Artist", "", "angry"]);
    }

    #[test]
    fn trailing_delimiter_yields_empty_field() {
        assert_eq!(parse_line("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn unterminated_quote_takes_rest_of_line() {
        let f = parse_line(r#"5,"Never closed, still going,sad"#);
        assert_eq!(f, vec!["5", "Never closed, still going,sad"]);
    }

    #[test]
    fn empty_line_is_one_empty_field() {
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn non_ascii_text_survives() {
        let f = parse_line("6,Café,Björk,\"naïve — words\",joy");
        assert_eq!(f[1], "Café");
        assert_eq!(f[2], "Björk");
        assert_eq!(f[3], "naïve — words");
    }
}
