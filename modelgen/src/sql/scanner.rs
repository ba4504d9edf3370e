//! Line-oriented state machine that groups DDL lines into tables.

use log::{debug, trace};

use super::lexer::{
    closes_table, create_table_body, extract_primary_keys, extract_table_name, is_create_table, is_skippable,
    split_fragments,
};

/// One `CREATE TABLE` statement as the scanner saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name as written between the backticks.
    pub name: String,
    /// Column-definition lines in declaration order, excluding the closing line.
    pub lines: Vec<String>,
    /// Column names listed by the table's `PRIMARY KEY` clause.
    pub primary_keys: Vec<String>,
    /// False when the table was flushed without seeing its closing line.
    pub closed: bool,
}

impl TableDefinition {
    /// Column fragments of every accumulated line, in order.
    pub fn fragments(&self) -> Vec<&str> {
        self.lines.iter().flat_map(|line| split_fragments(line)).collect()
    }
}

#[derive(Debug)]
struct PendingTable {
    name: String,
    lines: Vec<String>,
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Idle,
    InTable(PendingTable),
}

/// Feeds DDL text through the `Idle` / `InTable` state machine.
///
/// ```
/// use modelgen::sql::TableScanner;
///
/// let mut scanner = TableScanner::new();
/// scanner.push_line("CREATE TABLE `user` (");
/// scanner.push_line("  `id` int NOT NULL,");
/// scanner.push_line(") ENGINE=InnoDB;");
/// let tables = scanner.finish();
/// assert_eq!(tables[0].name, "user");
/// assert_eq!(tables[0].lines, vec!["  `id` int NOT NULL,"]);
/// ```
#[derive(Debug, Default)]
pub struct TableScanner {
    state: ScanState,
    tables: Vec<TableDefinition>,
}

impl TableScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a table is currently open.
    pub fn in_table(&self) -> bool {
        matches!(self.state, ScanState::InTable(_))
    }

    /// Tables completed so far.
    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    /// Advance the state machine by one line.
    pub fn push_line(&mut self, line: &str) {
        if is_skippable(line) {
            return;
        }

        let mut column_text = line;
        if is_create_table(line) {
            self.flush(false);
            match extract_table_name(line) {
                Some(name) => {
                    debug!("opening table `{name}`");
                    self.state = ScanState::InTable(PendingTable {
                        name,
                        lines: Vec::new(),
                    });
                    column_text = create_table_body(line);
                }
                None => {
                    debug!("CREATE TABLE without a backtick-quoted name: {line}");
                    return;
                }
            }
        }

        let ScanState::InTable(pending) = &mut self.state else {
            trace!("ignoring line outside a table: {line}");
            return;
        };

        if closes_table(line) {
            self.flush(true);
        } else if !column_text.trim().is_empty() {
            pending.lines.push(column_text.to_string());
        }
    }

    /// Flush any open table and return every table found, in file order.
    pub fn finish(mut self) -> Vec<TableDefinition> {
        self.flush(false);
        self.tables
    }

    fn flush(&mut self, closed: bool) {
        let ScanState::InTable(pending) = std::mem::take(&mut self.state) else {
            return;
        };
        if !closed {
            debug!("table `{}` flushed without a closing line", pending.name);
        }

        let primary_keys = {
            let fragments: Vec<&str> = pending.lines.iter().flat_map(|line| split_fragments(line)).collect();
            extract_primary_keys(&fragments)
        };
        debug!(
            "closing table `{}` with {} lines, primary key {:?}",
            pending.name,
            pending.lines.len(),
            primary_keys
        );

        self.tables.push(TableDefinition {
            name: pending.name,
            lines: pending.lines,
            primary_keys,
            closed,
        });
    }
}

/// Scan a whole SQL file.
pub fn scan_tables(sql: &str) -> Vec<TableDefinition> {
    let mut scanner = TableScanner::new();
    for line in sql.lines() {
        scanner.push_line(line);
    }
    scanner.finish()
}
