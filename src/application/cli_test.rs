use anyhow::bail;
use anyhow::Result;

use super::build;
use super::prompt_text;

#[test]
fn it_trims_credentials_passed_as_flags() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "marquee",
        "register",
        "--name",
        "  Ana ",
        "--email",
        " ana@example.com ",
    ])?;

    let subcmd_matches = match matches.subcommand_matches("register") {
        Some(subcmd_matches) => subcmd_matches,
        None => bail!("Missing register subcommand"),
    };

    assert_eq!(prompt_text(subcmd_matches, "name", "Name")?, "Ana");
    assert_eq!(
        prompt_text(subcmd_matches, "email", "Email")?,
        "ana@example.com"
    );

    return Ok(());
}
