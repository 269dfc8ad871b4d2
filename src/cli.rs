use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::{
    asc::Config,
    operations::{
        GetUserInfoOptions, InviteUserOptions, ListAppsOptions, ListBuildLocalizationsOptions,
        ListBuildsOptions, ListCertificatesOptions, ListPreReleaseVersionsOptions,
        ListUserInvitationsOptions, ListUsersOptions, UserRole,
    },
    render::{OutputFormat, TableRow, render_list, render_one},
    service::AppStoreConnectService,
};

#[derive(Parser, Debug)]
#[command(name = "asc", version, about = "App Store Connect CLI in Rust", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    #[command(flatten)]
    auth: AuthOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct AuthOptions {
    /// App Store Connect API issuer ID
    #[arg(long, global = true, env = "APPSTORE_CONNECT_ISSUER_ID")]
    api_issuer: Option<String>,

    /// App Store Connect API key ID
    #[arg(long, global = true, env = "APPSTORE_CONNECT_API_KEY_ID")]
    api_key_id: Option<String>,

    /// Contents of the .p8 private key (PEM or bare base64)
    #[arg(long, global = true, env = "APPSTORE_CONNECT_API_KEY", hide_env_values = true)]
    api_private_key: Option<String>,

    /// Path to the .p8 private key
    #[arg(long, global = true, env = "APPSTORE_CONNECT_API_KEY_PATH")]
    api_private_key_path: Option<PathBuf>,
}

impl AuthOptions {
    fn config(&self) -> Result<Config> {
        Ok(Config::load(
            self.api_issuer.clone(),
            self.api_key_id.clone(),
            self.api_private_key.clone(),
            self.api_private_key_path.clone(),
        )?)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage users and invitations on your team
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Look up apps
    Apps {
        #[command(subcommand)]
        command: AppsCommand,
    },
    /// List signing certificates for development and distribution
    Certificates {
        #[command(subcommand)]
        command: CertificatesCommand,
    },
    /// List builds and their beta localizations
    Builds {
        #[command(subcommand)]
        command: BuildsCommand,
    },
    /// List pre-release versions of your apps
    PreReleaseVersions {
        #[command(subcommand)]
        command: PreReleaseVersionsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// List users on your team
    List {
        /// Filter by username (email)
        #[arg(long = "username", value_delimiter = ',')]
        usernames: Vec<String>,
        /// Filter by role
        #[arg(long = "role", value_enum, value_delimiter = ',')]
        roles: Vec<UserRole>,
        /// Filter by visible app ID
        #[arg(long = "visible-app", value_delimiter = ',')]
        visible_apps: Vec<String>,
        /// Include the bundle IDs of each user's visible apps
        #[arg(long)]
        include_visible_apps: bool,
        /// Sort key
        #[arg(long, allow_hyphen_values = true,
              value_parser = ["username", "-username", "lastName", "-lastName"])]
        sort: Option<String>,
        /// Number of resources to return (max 200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
    },
    /// Get information about a user by email
    Info {
        /// The email address of the user
        email: String,
    },
    /// List pending invitations to join your team
    Invitations {
        /// Filter by email
        #[arg(long = "email", value_delimiter = ',')]
        emails: Vec<String>,
        /// Filter by role
        #[arg(long = "role", value_enum, value_delimiter = ',')]
        roles: Vec<UserRole>,
        /// Number of resources to return (max 200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
    },
    /// Invite a user to join your team
    Invite {
        /// The email address of the invitee
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Roles to grant
        #[arg(long = "role", value_enum, value_delimiter = ',', required = true)]
        roles: Vec<UserRole>,
        /// Let the user see every app
        #[arg(long)]
        all_apps_visible: bool,
        /// Let the user create certificates and provisioning profiles
        #[arg(long)]
        provisioning_allowed: bool,
        /// Bundle IDs of apps the user may see
        #[arg(long = "bundle-id", value_delimiter = ',', conflicts_with = "all_apps_visible")]
        bundle_ids: Vec<String>,
    },
    /// Cancel a pending invitation for a user to join your team
    CancelInvitation {
        /// The email address of a pending user invitation
        email: String,
    },
}

#[derive(Subcommand, Debug)]
enum AppsCommand {
    /// List apps
    List {
        #[arg(long = "bundle-id", value_delimiter = ',')]
        bundle_ids: Vec<String>,
        #[arg(long = "name", value_delimiter = ',')]
        names: Vec<String>,
        #[arg(long = "sku", value_delimiter = ',')]
        skus: Vec<String>,
        /// Sort key
        #[arg(long, allow_hyphen_values = true,
              value_parser = ["bundleId", "-bundleId", "name", "-name", "sku", "-sku"])]
        sort: Option<String>,
        /// Number of resources to return (max 200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
    },
    /// Get apps by exact bundle ID
    Get {
        #[arg(required = true)]
        bundle_ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum CertificatesCommand {
    /// List certificates
    List {
        /// Filter by serial number
        #[arg(long = "serial", value_delimiter = ',')]
        serials: Vec<String>,
        /// Filter by certificate type
        #[arg(long = "type", value_delimiter = ',', value_parser = [
            "IOS_DEVELOPMENT", "IOS_DISTRIBUTION", "MAC_APP_DISTRIBUTION",
            "MAC_INSTALLER_DISTRIBUTION", "MAC_APP_DEVELOPMENT", "DEVELOPER_ID_KEXT",
            "DEVELOPER_ID_APPLICATION", "DEVELOPMENT", "DISTRIBUTION",
        ])]
        types: Vec<String>,
        /// Filter by display name
        #[arg(long = "display-name", value_delimiter = ',')]
        display_names: Vec<String>,
        /// Sort key
        #[arg(long, allow_hyphen_values = true, value_parser = [
            "certificateType", "-certificateType", "displayName", "-displayName",
            "id", "-id", "serialNumber", "-serialNumber",
        ])]
        sort: Option<String>,
        /// Number of resources to return (max 200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum BuildsCommand {
    /// List builds of one or more apps
    List {
        /// Bundle IDs of the apps
        #[arg(required = true)]
        bundle_ids: Vec<String>,
        /// Filter by build number
        #[arg(long = "version", value_delimiter = ',')]
        versions: Vec<String>,
        /// Filter by marketing version
        #[arg(long = "pre-release-version", value_delimiter = ',')]
        pre_release_versions: Vec<String>,
        /// Filter by processing state
        #[arg(long = "processing-state", value_delimiter = ',',
              value_parser = ["PROCESSING", "FAILED", "INVALID", "VALID"])]
        processing_states: Vec<String>,
        /// Only expired builds
        #[arg(long, conflicts_with = "not_expired")]
        expired: bool,
        /// Only builds that have not expired
        #[arg(long)]
        not_expired: bool,
        /// Sort key
        #[arg(long, allow_hyphen_values = true,
              value_parser = ["uploadedDate", "-uploadedDate", "version", "-version"])]
        sort: Option<String>,
        /// Number of resources to return (max 200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
    },
    /// List the beta localizations (What's New) of a build
    Localizations {
        /// The build ID
        build_id: String,
        #[arg(long = "locale", value_delimiter = ',')]
        locales: Vec<String>,
        /// Number of resources to return (max 200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum PreReleaseVersionsCommand {
    /// List pre-release versions
    List {
        /// Bundle IDs of the apps
        #[arg(long = "bundle-id", value_delimiter = ',')]
        bundle_ids: Vec<String>,
        #[arg(long = "platform", value_delimiter = ',', value_parser = ["IOS", "MAC_OS", "TV_OS"])]
        platforms: Vec<String>,
        #[arg(long = "version", value_delimiter = ',')]
        versions: Vec<String>,
        /// Sort key
        #[arg(long, allow_hyphen_values = true, value_parser = ["version", "-version"])]
        sort: Option<String>,
        /// Number of resources to return (max 200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
    },
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let service = AppStoreConnectService::new(cli.auth.config()?)?;
    let output = cli.output;

    match cli.command {
        Commands::Users { command } => users_cmd(&service, command, output),
        Commands::Apps { command } => apps_cmd(&service, command, output),
        Commands::Certificates { command } => certificates_cmd(&service, command, output),
        Commands::Builds { command } => builds_cmd(&service, command, output),
        Commands::PreReleaseVersions { command } => {
            pre_release_versions_cmd(&service, command, output)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,asc_cli=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb
}

fn loading<T>(msg: &str, call: impl FnOnce() -> T) -> T {
    let pb = spinner(msg);
    let result = call();
    pb.finish_and_clear();
    result
}

fn print_list<T: Serialize + TableRow>(items: &[T], output: OutputFormat) -> Result<()> {
    println!("{}", render_list(items, output)?.trim_end());
    Ok(())
}

fn print_one<T: Serialize + TableRow>(item: &T, output: OutputFormat) -> Result<()> {
    println!("{}", render_one(item, output)?.trim_end());
    Ok(())
}

fn users_cmd(
    service: &AppStoreConnectService,
    command: UsersCommand,
    output: OutputFormat,
) -> Result<()> {
    match command {
        UsersCommand::List {
            usernames,
            roles,
            visible_apps,
            include_visible_apps,
            sort,
            limit,
        } => {
            let options = ListUsersOptions {
                usernames,
                roles,
                visible_app_ids: visible_apps,
                include_visible_apps,
                sort,
                limit,
            };
            let users = loading("Loading users...", || service.list_users(options))?;
            print_list(&users, output)
        }
        UsersCommand::Info { email } => {
            let options = GetUserInfoOptions { email };
            let user = loading("Loading user...", || service.get_user_info(options))?;
            print_one(&user, output)
        }
        UsersCommand::Invitations {
            emails,
            roles,
            limit,
        } => {
            let options = ListUserInvitationsOptions {
                emails,
                roles,
                limit,
            };
            let invitations = loading("Loading invitations...", || {
                service.list_user_invitations(options)
            })?;
            print_list(&invitations, output)
        }
        UsersCommand::Invite {
            email,
            first_name,
            last_name,
            roles,
            all_apps_visible,
            provisioning_allowed,
            bundle_ids,
        } => {
            let options = InviteUserOptions {
                email,
                first_name,
                last_name,
                roles,
                all_apps_visible,
                provisioning_allowed,
                bundle_ids,
            };
            let invitation = loading("Sending invitation...", || service.invite_user(options))?;
            print_one(&invitation, output)
        }
        UsersCommand::CancelInvitation { email } => {
            loading("Cancelling invitation...", || {
                service.cancel_user_invitation(&email)
            })?;
            println!("Invitation for {} cancelled", email);
            Ok(())
        }
    }
}

fn apps_cmd(
    service: &AppStoreConnectService,
    command: AppsCommand,
    output: OutputFormat,
) -> Result<()> {
    match command {
        AppsCommand::List {
            bundle_ids,
            names,
            skus,
            sort,
            limit,
        } => {
            let options = ListAppsOptions {
                bundle_ids,
                names,
                skus,
                sort,
                limit,
            };
            let apps = loading("Loading apps...", || service.list_apps(options))?;
            print_list(&apps, output)
        }
        AppsCommand::Get { bundle_ids } => {
            let apps = loading("Loading apps...", || service.get_apps(bundle_ids))?;
            print_list(&apps, output)
        }
    }
}

fn certificates_cmd(
    service: &AppStoreConnectService,
    command: CertificatesCommand,
    output: OutputFormat,
) -> Result<()> {
    match command {
        CertificatesCommand::List {
            serials,
            types,
            display_names,
            sort,
            limit,
        } => {
            let options = ListCertificatesOptions {
                serial_numbers: serials,
                certificate_types: types,
                display_names,
                sort,
                limit,
            };
            let certificates =
                loading("Loading certificates...", || service.list_certificates(options))?;
            print_list(&certificates, output)
        }
    }
}

fn builds_cmd(
    service: &AppStoreConnectService,
    command: BuildsCommand,
    output: OutputFormat,
) -> Result<()> {
    match command {
        BuildsCommand::List {
            bundle_ids,
            versions,
            pre_release_versions,
            processing_states,
            expired,
            not_expired,
            sort,
            limit,
        } => {
            let expired = match (expired, not_expired) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = ListBuildsOptions {
                bundle_ids,
                versions,
                pre_release_versions,
                processing_states,
                expired,
                sort,
                limit,
            };
            let builds = loading("Loading builds...", || service.list_builds(options))?;
            print_list(&builds, output)
        }
        BuildsCommand::Localizations {
            build_id,
            locales,
            limit,
        } => {
            let options = ListBuildLocalizationsOptions {
                build_id,
                locales,
                limit,
            };
            let localizations = loading("Loading localizations...", || {
                service.list_build_localizations(options)
            })?;
            print_list(&localizations, output)
        }
    }
}

fn pre_release_versions_cmd(
    service: &AppStoreConnectService,
    command: PreReleaseVersionsCommand,
    output: OutputFormat,
) -> Result<()> {
    match command {
        PreReleaseVersionsCommand::List {
            bundle_ids,
            platforms,
            versions,
            sort,
            limit,
        } => {
            let options = ListPreReleaseVersionsOptions {
                bundle_ids,
                platforms,
                versions,
                sort,
                limit,
            };
            let versions = loading("Loading pre-release versions...", || {
                service.list_pre_release_versions(options)
            })?;
            print_list(&versions, output)
        }
    }
}
