use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Jsonl,
    Csv,
    Table,
}

impl OutputFormat {
    /// Whether list columns (`REPEATED` fields) can be written.
    pub fn supports_lists(self) -> bool {
        match self {
            OutputFormat::Jsonl | OutputFormat::Table => true,
            OutputFormat::Csv => false,
        }
    }
}
