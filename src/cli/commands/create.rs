//! create-testing-site command - build a disposable testing site

use crate::cli::args::CreateArgs;
use crate::config::LocalConfig;
use crate::deps;
use crate::error::JroboResult;
use crate::site;
use console::style;
use std::path::Path;

/// Execute the create-testing-site command
pub async fn execute(
    args: CreateArgs,
    config: Option<&LocalConfig>,
    cms_path: &Path,
) -> JroboResult<()> {
    site::clean_site(cms_path).await?;

    deps::build().await?;

    site::copy_tree(Path::new("."), cms_path, site::SITE_EXCLUDES).await?;

    if let Some(user) = config.and_then(|c| c.local_user.as_deref()) {
        site::fix_ownership(cms_path, user).await?;
    }

    if args.use_htaccess {
        site::activate_htaccess(Path::new("htaccess.txt"), cms_path).await?;
    }

    println!(
        "{} Testing site created at {}",
        style("✓").green(),
        cms_path.display()
    );

    Ok(())
}
