//! This module handles parsing commands typed on stdin.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until1, take_while1},
    character::complete::{multispace0, multispace1},
    combinator::{map_res, rest, verify},
    IResult, Parser,
};
use wt_frame::DecorationId;

/// A command typed by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<'s> {
    /// Show the available commands.
    Help,

    /// Stop the scene and exit.
    Quit,

    /// Make a wish with the given text.
    Wish(&'s str),

    /// Add a gift with the given image.
    Gift(&'s str),

    /// Turn hand tracking on or off.
    Track(bool),

    /// Click on a decoration.
    Click(DecorationId),

    /// Move the pointer onto or off of a decoration.
    Hover(DecorationId, bool),
}

/// Parse a whole line of input, which must contain exactly one command and nothing else.
pub fn parse_line(input: &str) -> Option<Command<'_>> {
    match parse_command(input.trim()) {
        Ok((remaining, command)) if remaining.trim().is_empty() => Some(command),
        _ => None,
    }
}

/// Parse a command from the user's input.
#[allow(clippy::redundant_closure, reason = "style preference")]
pub fn parse_command(input: &str) -> IResult<&str, Command<'_>> {
    alt((
        parse_help.map(|()| Command::Help),
        parse_quit.map(|()| Command::Quit),
        parse_wish.map(|text| Command::Wish(text)),
        parse_gift.map(|image| Command::Gift(image)),
        parse_track.map(|enabled| Command::Track(enabled)),
        parse_click.map(|id| Command::Click(id)),
        parse_hover.map(|(id, hovered)| Command::Hover(id, hovered)),
    ))(input)
}

/// Parse the `help` or `?` command. See [`Command::Help`].
fn parse_help(input: &str) -> IResult<&str, ()> {
    let (input, _) = alt((tag("help"), tag("?")))(input)?;
    Ok((input, ()))
}

/// Parse the `quit` or `exit` command. See [`Command::Quit`].
fn parse_quit(input: &str) -> IResult<&str, ()> {
    let (input, _) = alt((tag("quit"), tag("exit")))(input)?;
    Ok((input, ()))
}

/// Parse a `wish` command, where the wish is everything after the first space. See
/// [`Command::Wish`].
fn parse_wish(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("wish")(input)?;
    let (input, _) = multispace1(input)?;
    verify(rest, |text: &str| !text.trim().is_empty())
        .map(str::trim_end)
        .parse(input)
}

/// Parse a `gift` command. See [`Command::Gift`].
fn parse_gift(input: &str) -> IResult<&str, &str> {
    /// Parse an image reference. This could be a URL or filename with no spaces, or anything in
    /// double or single quotes.
    fn parse_image(input: &str) -> IResult<&str, &str> {
        alt((
            tag("\"")
                .and(take_until1("\""))
                .and(tag("\""))
                .map(|((_, image), _)| image),
            tag("'")
                .and(take_until1("'"))
                .and(tag("'"))
                .map(|((_, image), _)| image),
            take_while1(|c: char| !c.is_whitespace()),
        ))(input)
    }

    let (input, _) = tag("gift")(input)?;
    let (input, _) = multispace1(input)?;
    parse_image(input)
}

/// Parse `on` or `off`.
fn parse_on_off(input: &str) -> IResult<&str, bool> {
    alt((tag("on").map(|_| true), tag("off").map(|_| false)))(input)
}

/// Parse a [`DecorationId`] like `-1`, `default-wish-0`, or `1703462400000`.
fn parse_id(input: &str) -> IResult<&str, DecorationId> {
    map_res(take_while1(|c: char| !c.is_whitespace()), str::parse::<DecorationId>)(input)
}

/// Parse a `track` command. See [`Command::Track`].
fn parse_track(input: &str) -> IResult<&str, bool> {
    let (input, _) = tag("track")(input)?;
    let (input, _) = multispace1(input)?;
    parse_on_off(input)
}

/// Parse a `click` command. See [`Command::Click`].
fn parse_click(input: &str) -> IResult<&str, DecorationId> {
    let (input, _) = tag("click")(input)?;
    let (input, _) = multispace1(input)?;
    parse_id(input)
}

/// Parse a `hover` command. See [`Command::Hover`].
fn parse_hover(input: &str) -> IResult<&str, (DecorationId, bool)> {
    let (input, _) = tag("hover")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, id) = parse_id(input)?;
    let (input, _) = multispace1(input)?;
    let (input, hovered) = parse_on_off(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (id, hovered)))
}
