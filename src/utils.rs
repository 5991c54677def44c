use crate::engine::{Board, Cell};

/// Parses a textual board description into a `Board`.
///
/// Each non-empty line is one row, given top to bottom. Lines starting
/// with `#` are comments and blank lines are ignored. Within a row, cells
/// are separated by `,` or `;`; an empty token (nothing between two
/// separators, or a trailing separator) denotes the blank cell. The board
/// size is the number of rows, and every row must carry that many cells.
///
/// Validation of the parsed contents (row and cell counts, the value
/// range, duplicates, exactly one blank) is delegated to
/// [`Board::from_contents`].
///
/// # Returns
/// * `Ok(Board)` if parsing and validation succeed.
/// * `Err(String)` describing the first problem found otherwise.
///
/// # Examples
/// ```
/// use taquin_solver::utils::board_from_str;
///
/// let board = board_from_str("# a solved 3x3 board\n0,1,2\n3,4,5\n6,7,").unwrap();
/// assert!(board.is_goal());
/// assert_eq!(board.size(), 3);
/// ```
pub fn board_from_str(input: &str) -> Result<Board, String> {
    let mut rows: Vec<Vec<Option<Cell>>> = Vec::new();
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut row = Vec::new();
        for token in line.split([',', ';']) {
            let token = token.trim();
            if token.is_empty() {
                row.push(None);
            } else {
                let value = token.parse::<Cell>().map_err(|_| {
                    format!("Unrecognized cell value '{}' in row {}", token, rows.len())
                })?;
                row.push(Some(value));
            }
        }
        rows.push(row);
    }
    Board::from_contents(rows.len(), &rows)
}
