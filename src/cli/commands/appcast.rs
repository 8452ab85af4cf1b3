//! `appcast`: NetSparkle update feed for uploaded installers.

use crate::{
    bundler::appcast::{AppcastRequest, generate_appcast},
    cli::{AppcastArgs, RuntimeConfig},
    error::Result,
    metadata,
};

pub async fn execute(args: &AppcastArgs, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();
    let product = metadata::load_config(config.project_dir(), config.config_path())?
        .package
        .product_name;

    output.progress("📦 Generating app cast...")?;
    output.indent(&format!("Version: {}", args.version))?;
    output.indent(&format!("URL: {}", args.url))?;
    output.indent(&format!("Installers: {}", args.installers_dir.display()))?;

    let appcast = generate_appcast(&AppcastRequest {
        installers_dir: &args.installers_dir,
        version: &args.version,
        base_url: &args.url,
        product: &product,
    })
    .await?;

    output.success("App cast generated!")?;
    output.indent(&format!("📄 {}", appcast.appcast.display()))?;
    output.indent(&format!("🔐 {}", appcast.signature.display()))?;

    output.heading("📤 Next steps:")?;
    output.indent("1. Upload these files to GitHub:")?;
    output.indent("   • appcast.xml")?;
    output.indent("   • appcast.xml.signature")?;
    output.indent("   • All your installer files")?;
    output.indent("2. Make sure appcast.xml is accessible at:")?;
    output.indent(&format!("   {}", appcast.public_url))?;
    output.indent("3. Your app will automatically check for updates!")?;
    Ok(0)
}
