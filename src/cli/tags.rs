use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Subcommand};

const TAG_SET_LONG_ABOUT: &str = "\
Set a tag on an application, device or release.

You can optionally provide a value to be associated with the created
tag, as an extra argument after the tag key. If a value isn't
provided, a tag with an empty value is created.";

const TAG_SET_EXAMPLES: &str = "\
Examples:
  $ fleet tag set mySimpleTag --application MyApp
  $ fleet tag set myCompositeTag myTagValue --application MyApp
  $ fleet tag set myCompositeTag myTagValue --device 7cf02a6
  $ fleet tag set myCompositeTag \"my tag value with whitespaces\" --device 7cf02a6
  $ fleet tag set myCompositeTag myTagValue --release 1234
  $ fleet tag set myCompositeTag --release 1234
  $ fleet tag set myCompositeTag --release b376b0e544e9429483b656490e5b9443b4349bd6";

/// Tag subcommands
#[derive(Subcommand, Debug)]
pub enum TagsCommands {
    /// Set a tag on an application, device or release
    #[command(long_about = TAG_SET_LONG_ABOUT, after_help = TAG_SET_EXAMPLES)]
    Set(TagSetArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TagSetArgs {
    /// The key string of the tag
    #[arg(value_name = "TAG_KEY", value_parser = NonEmptyStringValueParser::new())]
    pub tag_key: String,

    /// The optional value associated with the tag
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

/// The resource to tag. At most one may be given; giving none is reported
/// by the command itself.
#[derive(Args, Debug, Clone, Default)]
#[group(id = "target", multiple = false)]
pub struct TargetArgs {
    /// Application name or numeric id
    #[arg(long, short = 'a', value_name = "NAME_OR_ID")]
    pub application: Option<String>,

    /// Same as '--application' (deprecated)
    #[arg(long, value_name = "NAME_OR_ID")]
    pub app: Option<String>,

    /// Device UUID (full or short) or numeric id
    #[arg(long, short = 'd', value_name = "UUID_OR_ID")]
    pub device: Option<String>,

    /// Release id or commit (full or short)
    #[arg(long, short = 'r', value_name = "ID_OR_COMMIT")]
    pub release: Option<String>,
}
