use bcv_rates::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("BCV Rates - Venezuelan Central Bank Exchange Rate Extractor");
    println!("===========================================================");
    println!();
    println!("Consolidate the official exchange rate tables published by the BCV as");
    println!("quarterly spreadsheet workbooks into a single queryable CSV dataset.");
    println!();
    println!("USAGE:");
    println!("    bcv-rates <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract     Extract rate tables from workbooks into the CSV dataset");
    println!("    export      Export JSON projections derived from the dataset");
    println!("    query       Query the dataset by date, currency or statistics");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract all workbooks from the default Data_xls directory:");
    println!("    bcv-rates extract");
    println!();
    println!("    # Extract from a custom directory into a custom dataset file:");
    println!("    bcv-rates extract --input /path/to/workbooks --output rates.csv");
    println!();
    println!("    # Export all JSON views, plus a dedicated USD view:");
    println!("    bcv-rates export --currency USD");
    println!();
    println!("    # Query rates for a date (several input formats work):");
    println!("    bcv-rates query date 2025-03-08");
    println!("    bcv-rates query date \"marzo 8 2025\"");
    println!();
    println!("    # Latest rates, one currency's history, summary statistics:");
    println!("    bcv-rates query latest");
    println!("    bcv-rates query currency USD --from 2025-01-01");
    println!("    bcv-rates query stats USD");
    println!();
    println!("For detailed help on any command, use:");
    println!("    bcv-rates <COMMAND> --help");
}
