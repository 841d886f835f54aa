pub mod collections;
pub mod doctor;
pub mod documents;
pub mod extract;

use crate::app::AppContext;
use crate::cli::Commands;

/// Dispatch a parsed subcommand to its handler.
pub fn run(ctx: &AppContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => collections::handle_list(ctx, args),
        Commands::Add(args) => collections::handle_add(ctx, args),
        Commands::Replace(args) => collections::handle_replace(ctx, args),
        Commands::Remove(args) => collections::handle_remove(ctx, args),
        Commands::Show(args) => documents::handle_show(ctx, args),
        Commands::Documents => documents::handle_documents(ctx),
        Commands::PassportData => documents::handle_passport_data(ctx),
        Commands::Answer(args) => documents::handle_answer(ctx, args),
        Commands::Doctor => doctor::handle_doctor(ctx),
        Commands::Extract(args) => extract::handle_extract(args),
    }
}
