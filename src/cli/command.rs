pub enum Command {
    /// Write one `scan_<NNNN>.csv` per size class.
    Csvs,
    /// Time every query template against the `scan_<NNNN>` tables.
    Scan {
        label: String,
        connection_uri: String,
    },
}
