use std::path::PathBuf;

use clap::Parser;
use platecraft_core::ImageStyle;

/// Platecraft virtual food photographer
#[derive(Debug, Parser)]
#[command(name = "platecraft", about = "Turn a restaurant menu into a gallery of dish photographs")]
pub struct Args {
    /// Path to configuration file; without one the API key is read from the environment
    #[arg(short, long, env = "PLATECRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Menu text file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub menu: PathBuf,

    /// Photograph style: rustic-dark, bright-modern or social-media
    #[arg(short, long)]
    pub style: Option<ImageStyle>,

    /// Directory the gallery images are written to
    #[arg(short, long, default_value = "gallery")]
    pub out: PathBuf,

    /// Edit a dish after generation, e.g. --edit "Caesar Salad=add more croutons"
    #[arg(long = "edit", value_name = "DISH=INSTRUCTION", value_parser = parse_edit)]
    pub edits: Vec<EditRequest>,
}

/// One requested edit, addressed by dish name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub dish: String,
    pub instruction: String,
}

fn parse_edit(raw: &str) -> Result<EditRequest, String> {
    let (dish, instruction) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DISH=INSTRUCTION, got `{raw}`"))?;

    let (dish, instruction) = (dish.trim(), instruction.trim());
    if dish.is_empty() || instruction.is_empty() {
        return Err(format!("dish and instruction must both be non-empty in `{raw}`"));
    }

    Ok(EditRequest {
        dish: dish.to_owned(),
        instruction: instruction.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_invocation() {
        let args = Args::try_parse_from([
            "platecraft",
            "--menu",
            "menu.txt",
            "--style",
            "rustic-dark",
            "--edit",
            "Caesar Salad = add croutons",
            "--edit",
            "Pizza=more basil",
        ])
        .unwrap();

        assert_eq!(args.menu, PathBuf::from("menu.txt"));
        assert_eq!(args.style, Some(ImageStyle::RusticDark));
        assert_eq!(args.out, PathBuf::from("gallery"));
        assert_eq!(args.edits.len(), 2);
        assert_eq!(
            args.edits[0],
            EditRequest {
                dish: "Caesar Salad".to_owned(),
                instruction: "add croutons".to_owned(),
            }
        );
    }

    #[test]
    fn menu_defaults_to_stdin() {
        let args = Args::try_parse_from(["platecraft"]).unwrap();
        assert_eq!(args.menu, PathBuf::from("-"));
        assert!(args.style.is_none());
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!(Args::try_parse_from(["platecraft", "--style", "watercolor"]).is_err());
    }

    #[test]
    fn malformed_edit_is_rejected() {
        assert!(parse_edit("no separator").is_err());
        assert!(parse_edit("=instruction only").is_err());
        assert!(parse_edit("Dish=  ").is_err());
    }
}
