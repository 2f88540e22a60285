use clap::Parser;

/// This is a survey response analysis program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional, default config.txt) The configuration file describing the survey:
    /// the workbook to read, the report to write, the summarization settings and the type of
    /// each question. For more information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) The Excel workbook containing the responses. Setting this option
    /// overrides the workbook named in the configuration file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (optional) The name of the worksheet to read. Setting this option overrides the sheet
    /// named in the configuration file.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a summary of the analysis will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the outcome of an analysis in JSON format.
    /// If provided, survalyze will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
