use anyhow::Result;
use clap::{Parser, Subcommand};
use twig::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A minimal content-addressable version control engine",
    long_about = "twig is a minimal version control engine: a content-addressable \
    object store layered with tree snapshots, commit chaining, branch refs and a \
    symbolic-or-detached HEAD. It is a learning-scale tool, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "Initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1, help = "The file to hash")]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "Prints the content of an object in the repository, \
        addressed by its digest or a unique prefix of it (2 or more characters)."
    )]
    CatFile {
        #[arg(index = 1, help = "The object digest or unique prefix")]
        object: String,
    },
    #[command(
        name = "add",
        about = "Stage files or directories for the next commit"
    )]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot as a new commit"
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or commit, rebuilding the working tree",
        long_about = "Switches HEAD to the given branch or commit digest and rebuilds \
        the working tree from that commit's snapshot. Unstaged local changes are lost."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or commit digest")]
        target: String,
    },
    #[command(name = "log", about = "Show the commit history from HEAD")]
    Log,
}

fn repository_at_pwd() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Ok(Repository::new(
        &pwd.to_string_lossy(),
        Box::new(std::io::stdout()),
    )?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => repository_at_pwd()?,
            };

            repository.init()?
        }
        Commands::HashObject { write, file } => repository_at_pwd()?.hash_object(file, *write)?,
        Commands::CatFile { object } => repository_at_pwd()?.cat_file(object)?,
        Commands::Add { paths } => repository_at_pwd()?.add(paths)?,
        Commands::Commit { message } => repository_at_pwd()?.commit(message)?,
        Commands::Checkout { target } => repository_at_pwd()?.checkout(target)?,
        Commands::Log => repository_at_pwd()?.log()?,
    }

    Ok(())
}
