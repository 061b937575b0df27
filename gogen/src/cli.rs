//! Command-line argument surface.

use clap::{Args, Parser, Subcommand};
use gogen_codegen::{ArtifactKind, FieldPolicy, GenerateRequest, IncludeEntry};
use std::path::PathBuf;

/// Top-level CLI.
#[derive(Parser, Debug)]
#[command(name = "gogen", about = "Generate Go companion files from type declarations", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a companion artifact for a type declaration.
    #[command(subcommand)]
    Type(TypeCommand),
}

/// Artifact kinds generatable from a type declaration.
#[derive(Subcommand, Debug)]
pub enum TypeCommand {
    /// Generate a data model with a step-wise builder.
    Model(ArtifactArgs),
    /// Generate a persistence-mapping document (BSON).
    Document(ArtifactArgs),
    /// Generate a wire-transfer payload (JSON).
    Payload(ArtifactArgs),
}

impl TypeCommand {
    /// The requested artifact kind.
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Model(_) => ArtifactKind::Model,
            Self::Document(_) => ArtifactKind::Document,
            Self::Payload(_) => ArtifactKind::Payload,
        }
    }

    /// The shared artifact arguments.
    #[must_use]
    pub fn args(&self) -> &ArtifactArgs {
        match self {
            Self::Model(args) | Self::Document(args) | Self::Payload(args) => args,
        }
    }
}

/// Arguments shared by every artifact kind.
#[derive(Args, Debug)]
pub struct ArtifactArgs {
    /// Target type name.
    #[arg(short = 'n', long, value_name = "TYPE")]
    pub name: String,

    /// Module root used to classify internal imports.
    #[arg(short = 'r', long, value_name = "MODULE", default_value = "")]
    pub repo: String,

    /// Whitelist a field, optionally renaming its serialized key.
    #[arg(short = 'i', long = "include", value_name = "FIELD[=KEY]")]
    pub include: Vec<String>,

    /// Drop a field unconditionally.
    #[arg(short = 'x', long = "exclude", value_name = "FIELD")]
    pub exclude: Vec<String>,

    /// Only whitelisted fields participate.
    #[arg(long)]
    pub strict: bool,

    /// Variant tag appended to generated type and file names.
    #[arg(short = 't', long, value_name = "TAG")]
    pub tag: Option<String>,
}

impl ArtifactArgs {
    /// Builds the generation request for `kind`, scanning `dir`.
    #[must_use]
    pub fn to_request(&self, kind: ArtifactKind, dir: PathBuf) -> GenerateRequest {
        let include = self
            .include
            .iter()
            .map(|entry| IncludeEntry::parse(entry))
            .collect();

        GenerateRequest {
            kind,
            type_name: self.name.clone(),
            repo: self.repo.clone(),
            dir,
            policy: FieldPolicy::new(include, self.exclude.iter().cloned(), self.strict),
            tag: self.tag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_payload_invocation() {
        let cli = Cli::parse_from([
            "gogen", "type", "payload", "--name", "User", "--repo", "example.com/app",
            "--strict", "-i", "ID", "-i", "Name=n", "--tag", "Partial",
        ]);
        let Command::Type(command) = cli.command;
        assert_eq!(command.kind(), ArtifactKind::Payload);

        let args = command.args();
        assert_eq!(args.name, "User");
        assert_eq!(args.repo, "example.com/app");
        assert!(args.strict);
        assert_eq!(args.include, vec!["ID", "Name=n"]);
        assert_eq!(args.tag.as_deref(), Some("Partial"));
    }

    #[test]
    fn test_parse_document_excludes() {
        let cli = Cli::parse_from([
            "gogen", "type", "document", "-n", "User", "-x", "Profile", "-x", "Workspaces",
        ]);
        let Command::Type(command) = cli.command;
        assert_eq!(command.kind(), ArtifactKind::Document);
        assert_eq!(command.args().exclude, vec!["Profile", "Workspaces"]);
        assert!(!command.args().strict);
    }

    #[test]
    fn test_request_mapping() {
        let cli = Cli::parse_from(["gogen", "type", "model", "--name", "Account"]);
        let Command::Type(command) = cli.command;
        let request = command
            .args()
            .to_request(command.kind(), PathBuf::from("."));
        assert_eq!(request.type_name, "Account");
        assert_eq!(request.kind, ArtifactKind::Model);
        assert!(request.tag.is_none());
    }
}
