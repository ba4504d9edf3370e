//! Line-shape extraction for the supported DDL style.
//!
//! Each function recognizes one shape of line with a regex or a character scan.
//! None of this is a SQL grammar: it expects backtick-quoted identifiers, one
//! statement per table and an inline `PRIMARY KEY (...)` clause.

use once_cell::sync::Lazy;
use regex::Regex;

static CREATE_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*CREATE\s+TABLE\b").expect("valid regex"));

static TABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?`([^`]+)`").expect("valid regex")
});

static ORDERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+(?:ASC|DESC)\b").expect("valid regex"));

static PRIMARY_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\b").expect("valid regex"));

static PRIMARY_KEY_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\s*\(([^)]+)\)").expect("valid regex"));

static COLUMN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*`([^`]+)`\s+([A-Za-z0-9]+)(?:\s*\(\s*([0-9]+(?:\s*,\s*[0-9]+)?)\s*\))?(.*)$")
        .expect("valid regex")
});

static NOT_NULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bnot\s+null\b").expect("valid regex"));

static DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bdefault\s+('(?:[^']|'')*'|"[^"]*"|\([^)]*\)|[^\s,]+)"#).expect("valid regex")
});

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcomment\s+'((?:[^']|'')*)'").expect("valid regex"));

/// One column definition pulled out of a DDL fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub sql_type: String,
    /// Parenthesized size qualifier without the parentheses, e.g. `100` or `10,2`.
    pub size: Option<String>,
    pub not_null: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
}

/// Whether the line carries nothing for the scanner: blank, or a `--` comment.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("--")
}

/// Whether the line opens a `CREATE TABLE` statement.
pub fn is_create_table(line: &str) -> bool {
    CREATE_TABLE.is_match(line)
}

/// Backtick-quoted table name of a `CREATE TABLE` line.
pub fn extract_table_name(line: &str) -> Option<String> {
    TABLE_NAME
        .captures(line)
        .map(|caps| caps[1].to_string())
}

/// Text after the first `(` of a `CREATE TABLE` line; empty when the column
/// list starts on a later line.
pub fn create_table_body(line: &str) -> &str {
    line.find('(').map_or("", |index| &line[index + 1..])
}

/// Close-paren count minus open-paren count.
pub fn paren_balance(line: &str) -> isize {
    line.chars().fold(0, |balance, ch| match ch {
        '(' => balance - 1,
        ')' => balance + 1,
        _ => balance,
    })
}

/// The statement-closing heuristic: a line with exactly one more `)` than `(`
/// (e.g. `) ENGINE=InnoDB;`) ends the column list. Balanced lines and lines off
/// by any other amount never do, whatever else they contain.
pub fn closes_table(line: &str) -> bool {
    paren_balance(line) == 1
}

/// Split a line into column fragments at commas outside parentheses and quotes.
///
/// Multi-line statements usually yield one fragment per line; a statement
/// written on one line yields one fragment per column or constraint.
pub fn split_fragments(line: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth = 0isize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (index, ch) in line.char_indices() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '(' => depth += 1,
                ')' => depth -= 1,
                ',' if depth <= 0 => {
                    fragments.push(&line[start..index]);
                    start = index + 1;
                }
                _ => {}
            },
        }
    }
    fragments.push(&line[start..]);

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Drop ` ASC` / ` DESC` ordering markers.
pub fn strip_ordering(fragment: &str) -> String {
    ORDERING.replace_all(fragment, "").into_owned()
}

/// Column names of the first `PRIMARY KEY` clause among `fragments`.
///
/// Scanning stops at the first fragment whose definition, outside its comment
/// and default text, mentions `PRIMARY KEY`. A column declared inline as
/// `... PRIMARY KEY` is its own key. No match gives an empty list.
pub fn extract_primary_keys<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    let Some((fragment, definition)) = fragments
        .iter()
        .map(|fragment| (fragment.as_ref(), key_definition(fragment.as_ref())))
        .find(|(_, definition)| PRIMARY_KEY.is_match(definition))
    else {
        return Vec::new();
    };

    if let Some(caps) = PRIMARY_KEY_LIST.captures(&definition) {
        return caps[1]
            .split(',')
            .map(|name| name.trim().trim_matches('`').trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
    }

    parse_column(fragment)
        .map(|column| vec![column.name])
        .unwrap_or_default()
}

/// Fragment text with ordering markers, the comment and the default removed.
fn key_definition(fragment: &str) -> String {
    let mut definition = strip_ordering(fragment);
    take_capture(&COMMENT, &mut definition);
    take_capture(&DEFAULT, &mut definition);
    definition
}

/// Parse one column-shaped fragment: `` `name` TYPE[(size)] [constraints] ``.
///
/// Fragments of any other shape (key clauses, constraints, the statement
/// header) return `None`.
pub fn parse_column(fragment: &str) -> Option<ColumnDefinition> {
    let fragment = strip_ordering(fragment);
    let caps = COLUMN.captures(&fragment)?;

    let mut column = ColumnDefinition {
        name: caps[1].to_string(),
        sql_type: caps[2].to_string(),
        size: caps
            .get(3)
            .map(|size| size.as_str().split(',').map(str::trim).collect::<Vec<_>>().join(",")),
        ..Default::default()
    };

    let mut tail = caps.get(4).map_or_else(String::new, |m| m.as_str().to_string());

    // Comment text may mention other keywords, so it is cut out first.
    column.comment = take_capture(&COMMENT, &mut tail);
    column.default = take_capture(&DEFAULT, &mut tail);
    column.not_null = NOT_NULL.is_match(&tail);

    Some(column)
}

/// Remove the first match of `re` from `text`, returning its first group.
fn take_capture(re: &Regex, text: &mut String) -> Option<String> {
    let (value, range) = {
        let caps = re.captures(text.as_str())?;
        (caps[1].to_string(), caps.get(0)?.range())
    };
    text.replace_range(range, "");
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skippable_lines() {
        assert!(is_skippable(""));
        assert!(is_skippable("   \t"));
        assert!(is_skippable("-- users table"));
        assert!(is_skippable("   -- indented comment"));
        assert!(!is_skippable("  `id` int,"));
    }

    #[test]
    fn test_extract_table_name() {
        assert_eq!(extract_table_name("CREATE TABLE `user` ("), Some("user".to_string()));
        assert_eq!(
            extract_table_name("create table if not exists `order_item` ("),
            Some("order_item".to_string())
        );
        assert_eq!(extract_table_name("CREATE TABLE user ("), None);
        assert!(is_create_table("CREATE TABLE user ("));
        assert!(!is_create_table("  `created_table` int,"));
    }

    #[test]
    fn test_create_table_body() {
        assert_eq!(create_table_body("CREATE TABLE `user` ("), "");
        assert_eq!(create_table_body("CREATE TABLE `user` (`id` int)"), "`id` int)");
        assert_eq!(create_table_body("CREATE TABLE `user`"), "");
    }

    #[test]
    fn test_closing_heuristic_boundary() {
        assert!(closes_table(") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"));
        assert!(closes_table(");"));
        assert!(closes_table("  PRIMARY KEY (`id`))"));
        assert!(closes_table("anything at all )"));

        assert!(!closes_table("  `name` varchar(100) NOT NULL,"));
        assert!(!closes_table("  `id` int,"));
        assert!(!closes_table("CREATE TABLE `user` ("));
        assert!(!closes_table("))"));
        assert!(!closes_table(")) ENGINE=InnoDB;"));
    }

    #[test]
    fn test_paren_balance() {
        assert_eq!(paren_balance("()"), 0);
        assert_eq!(paren_balance(")"), 1);
        assert_eq!(paren_balance("((("), -3);
    }

    #[test]
    fn test_split_fragments() {
        assert_eq!(split_fragments("  `id` int NOT NULL,"), vec!["`id` int NOT NULL"]);
        assert_eq!(
            split_fragments("`id` int, `price` decimal(10,2), `tag` varchar(8) DEFAULT 'a,b'"),
            vec!["`id` int", "`price` decimal(10,2)", "`tag` varchar(8) DEFAULT 'a,b'"]
        );
        assert_eq!(
            split_fragments("`id` int NOT NULL, PRIMARY KEY (`id`, `org_id`));"),
            vec!["`id` int NOT NULL", "PRIMARY KEY (`id`, `org_id`));"]
        );
    }

    #[test]
    fn test_extract_primary_keys() {
        let lines = ["`id` int NOT NULL", "PRIMARY KEY (`id`)", "PRIMARY KEY (`other`)"];
        assert_eq!(extract_primary_keys(&lines), vec!["id"]);

        let composite = ["`a` int", "PRIMARY KEY ( `a` , `b` DESC )"];
        assert_eq!(extract_primary_keys(&composite), vec!["a", "b"]);

        let none = ["`a` int", "KEY `idx_a` (`a`)"];
        assert!(extract_primary_keys(&none).is_empty());

        let inline = ["`id` int NOT NULL PRIMARY KEY", "`name` text"];
        assert_eq!(extract_primary_keys(&inline), vec!["id"]);
    }

    #[test]
    fn test_primary_key_text_in_comment_or_default_is_ignored() {
        let lines = [
            "`legacy_id` int COMMENT 'old primary key value'",
            "`kind` varchar(20) DEFAULT 'primary key'",
            "`id` int NOT NULL",
            "PRIMARY KEY (`id`)",
        ];
        assert_eq!(extract_primary_keys(&lines), vec!["id"]);

        let inline = ["`id` int PRIMARY KEY COMMENT 'primary key (legacy)'"];
        assert_eq!(extract_primary_keys(&inline), vec!["id"]);
    }

    #[test]
    fn test_parse_column_shapes() {
        let column = parse_column("`user_id` int(11) NOT NULL").unwrap();
        assert_eq!(column.name, "user_id");
        assert_eq!(column.sql_type, "int");
        assert_eq!(column.size.as_deref(), Some("11"));
        assert!(column.not_null);
        assert_eq!(column.default, None);

        let column = parse_column("`name` varchar(100) DEFAULT 'anon'").unwrap();
        assert_eq!(column.size.as_deref(), Some("100"));
        assert_eq!(column.default.as_deref(), Some("'anon'"));
        assert!(!column.not_null);

        let column = parse_column("`price` decimal(10, 2) NOT NULL DEFAULT 0 COMMENT 'unit price, not null'").unwrap();
        assert_eq!(column.size.as_deref(), Some("10,2"));
        assert_eq!(column.default.as_deref(), Some("0"));
        assert_eq!(column.comment.as_deref(), Some("unit price, not null"));
        assert!(column.not_null);

        let column = parse_column("`created_at` datetime DEFAULT CURRENT_TIMESTAMP").unwrap();
        assert_eq!(column.sql_type, "datetime");
        assert_eq!(column.default.as_deref(), Some("CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_parse_column_rejects_other_shapes() {
        assert!(parse_column("PRIMARY KEY (`id`)").is_none());
        assert!(parse_column("KEY `idx_name` USING BTREE (`name`)").is_none());
        assert!(parse_column("UNIQUE KEY `uk_email` (`email`)").is_none());
        assert!(parse_column("CONSTRAINT `fk` FOREIGN KEY (`a`) REFERENCES `b` (`id`)").is_none());
        assert!(parse_column("CREATE TABLE `user` (").is_none());
    }

    #[test]
    fn test_ordering_markers_are_dropped() {
        assert_eq!(strip_ordering("PRIMARY KEY (`a` DESC, `b` ASC)"), "PRIMARY KEY (`a`, `b`)");
    }
}
