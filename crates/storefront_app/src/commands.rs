use listing_core::{
    property_type_api_value, property_type_labels, FilterKey, FilterValue, ListingKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStep {
    Next,
    Prev,
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `filter key=value ...`; an empty value removes the key.
    Filter(Vec<(FilterKey, Option<FilterValue>)>),
    Clear,
    Page(u32),
    Next,
    Prev,
    First,
    Last,
    More,
    Retry,
    Width(u32),
    Show(ListingKey),
    Photo(PhotoStep),
    View,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a positive number")]
    InvalidNumber(String),
    #[error("expected key=value, got {0:?}")]
    MalformedFilter(String),
    #[error("unknown filter {0:?}")]
    UnknownFilter(String),
    #[error("unknown property type {0:?}")]
    UnknownPropertyType(String),
    #[error("{key} expects a whole number, got {value:?}")]
    NotANumber { key: FilterKey, value: String },
}

const COMMAND_HELP: &str = "\
Commands:
  filter key=value ...   set filters (empty value clears a key)
  clear                  remove all filters
  more                   load the next page (scroll mode)
  page N                 jump to page N (paged mode)
  next | prev            move one block of pages
  first | last           jump to the first or last page
  retry                  reload after a failure
  width PX               set the viewport width
  show KEY               open a listing
  photo next|prev        step through the open listing's photos
  view                   redraw the grid
  help                   show this text
  quit                   exit
Filter keys: city, min_price, max_price, min_year_built, max_year_built,
  min_rooms, max_rooms, min_bathrooms, max_bathrooms, min_area, max_area,
  property_type";

/// Command reference followed by the accepted property types.
pub fn help_text() -> String {
    let property_types = property_type_labels()
        .map(|label| label.replace(' ', "_"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{COMMAND_HELP}\nProperty types: {property_types}")
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "filter" | "f" => Command::Filter(
            args.iter()
                .map(|arg| parse_filter(arg))
                .collect::<Result<_, _>>()?,
        ),
        "clear" => Command::Clear,
        "page" | "p" => Command::Page(number_arg(&args, "page")?),
        "next" | "n" => Command::Next,
        "prev" => Command::Prev,
        "first" => Command::First,
        "last" => Command::Last,
        "more" | "m" => Command::More,
        "retry" => Command::Retry,
        "width" => Command::Width(number_arg(&args, "width")?),
        "show" | "s" => match args.first() {
            Some(key) => Command::Show(ListingKey::new(*key)),
            None => return Err(CommandError::MissingArgument("show")),
        },
        "photo" => match args.first().map(|step| step.to_ascii_lowercase()) {
            Some(step) if step == "next" => Command::Photo(PhotoStep::Next),
            Some(step) if step == "prev" => Command::Photo(PhotoStep::Prev),
            Some(step) => return Err(CommandError::Unknown(format!("photo {step}"))),
            None => return Err(CommandError::MissingArgument("photo")),
        },
        "view" | "v" => Command::View,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn number_arg(args: &[&str], command: &'static str) -> Result<u32, CommandError> {
    let raw = args.first().ok_or(CommandError::MissingArgument(command))?;
    match raw.parse::<u32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(CommandError::InvalidNumber(raw.to_string())),
    }
}

fn parse_filter(arg: &str) -> Result<(FilterKey, Option<FilterValue>), CommandError> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| CommandError::MalformedFilter(arg.to_string()))?;
    let key = FilterKey::from_query_name(name.trim())
        .ok_or_else(|| CommandError::UnknownFilter(name.to_string()))?;

    let Some(value) = FilterValue::parse(raw) else {
        return Ok((key, None));
    };
    let value = match key {
        FilterKey::City => FilterValue::Text(raw.trim().replace('_', " ")),
        FilterKey::PropertyType => {
            let label = raw.trim().replace('_', " ");
            let api = property_type_api_value(&label)
                .or_else(|| property_type_api_value(raw))
                .ok_or_else(|| CommandError::UnknownPropertyType(raw.to_string()))?;
            FilterValue::Text(api.to_string())
        }
        _ => match value {
            FilterValue::Number(_) => value,
            FilterValue::Text(text) => return Err(CommandError::NotANumber { key, value: text }),
        },
    };
    Ok((key, Some(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_and_normalize() {
        let command =
            parse_command("filter max_price=500000 property_type=half_duplex city=North_Vancouver min_rooms=")
                .unwrap();
        assert_eq!(
            command,
            Command::Filter(vec![
                (FilterKey::MaxPrice, Some(FilterValue::Number(500000))),
                (
                    FilterKey::PropertyType,
                    Some(FilterValue::Text("Half_Duplex".into()))
                ),
                (
                    FilterKey::City,
                    Some(FilterValue::Text("North Vancouver".into()))
                ),
                (FilterKey::MinRooms, None),
            ])
        );
    }

    #[test]
    fn bad_filters_are_rejected() {
        assert_eq!(
            parse_command("filter colour=red"),
            Err(CommandError::UnknownFilter("colour".into()))
        );
        assert_eq!(
            parse_command("filter max_price"),
            Err(CommandError::MalformedFilter("max_price".into()))
        );
        assert_eq!(
            parse_command("filter property_type=Castle"),
            Err(CommandError::UnknownPropertyType("Castle".into()))
        );
        assert!(matches!(
            parse_command("filter min_price=cheap"),
            Err(CommandError::NotANumber { .. })
        ));
    }

    #[test]
    fn help_lists_property_types_in_typeable_form() {
        let help = help_text();
        assert!(help.contains("Property types: Single_Family_Residence, Townhouse"));
        assert!(help.contains("Manufactured_On_Land"));
        // Every listed spelling must parse back as a filter value.
        let listed = help.rsplit("Property types: ").next().unwrap_or_default();
        for label in listed.split(", ") {
            assert!(
                parse_command(&format!("filter property_type={label}")).is_ok(),
                "{label} should parse"
            );
        }
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(parse_command("page 37"), Ok(Command::Page(37)));
        assert_eq!(
            parse_command("page 0"),
            Err(CommandError::InvalidNumber("0".into()))
        );
        assert_eq!(
            parse_command("page"),
            Err(CommandError::MissingArgument("page"))
        );
        assert_eq!(parse_command("  NEXT "), Ok(Command::Next));
        assert_eq!(parse_command("photo prev"), Ok(Command::Photo(PhotoStep::Prev)));
        assert_eq!(
            parse_command("show 262881234"),
            Ok(Command::Show(ListingKey::new("262881234")))
        );
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }
}
