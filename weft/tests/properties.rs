use weft::*;

fn panicking() -> impl Parser<Output = String> {
    from_fn::<String, _>(|_| panic!("the second alternative must not run"))
}

#[test]
fn succeed_is_the_identity() {
    for input in ["", "a", "some longer input"] {
        assert_eq!(succeed('v').parse(input), Ok(ParseState::new('v', input)));
    }
}

#[test]
fn item_on_empty_and_non_empty_input() {
    assert_eq!(item().parse(""), Err(Failure::new("Empty input")));
    assert_eq!(item().parse("abc"), Ok(ParseState::new('a', "bc")));
}

#[test]
fn char_reports_the_offending_input() {
    assert_eq!(char('f').parse("foo"), Ok(ParseState::new('f', "oo")));
    assert_eq!(char('f').parse("bar"), Err(Failure::new("Invalid input: bar")));
}

#[test]
fn fail_truncates_after_ten_chars() {
    assert_eq!(
        fail::<char>().parse("0123456789").unwrap_err().message(),
        "Invalid input: 0123456789"
    );
    assert_eq!(
        fail::<char>().parse("01234567891").unwrap_err().message(),
        "Invalid input: 0123456789..."
    );
}

#[test]
fn or_short_circuits() {
    let colour = string("yellow").or(panicking());
    assert_eq!(
        colour.parse("yellow"),
        Ok(ParseState::new("yellow".to_string(), ""))
    );

    let colour = choice((string("yellow"), panicking(), panicking()));
    assert_eq!(
        colour.parse("yellow"),
        Ok(ParseState::new("yellow".to_string(), ""))
    );
}

#[test]
fn or_falls_back_to_the_second_alternative() {
    let colour = string("yellow").or(string("orange"));
    assert_eq!(
        colour.parse("orange"),
        Ok(ParseState::new("orange".to_string(), ""))
    );
    assert_eq!(
        colour.parse("yelp").unwrap_err().message(),
        "Invalid input: p OR Invalid input: yelp"
    );
}

#[test]
fn string_of_nothing_matches_nothing() {
    assert_eq!(string("").parse(""), Ok(ParseState::new(String::new(), "")));
}

#[test]
fn zero_or_more_digits() {
    let digits = text::digit().zero_or_more();
    assert_eq!(
        digits.parse("123abc"),
        Ok(ParseState::new(vec!['1', '2', '3'], "abc"))
    );
    assert_eq!(digits.parse("abc"), Ok(ParseState::new(Vec::new(), "abc")));
}

#[test]
fn maps_compose() {
    let f = |c: char| c.len_utf8();
    let g = |n: usize| n * 2;
    let twice = item().map(f).map(g);
    let once = item().map(move |c| g(f(c)));
    for input in ["", "a", "ß", "語x"] {
        assert_eq!(twice.parse(input), once.parse(input));
    }
}

#[test]
fn bind_threads_the_residual_input() {
    // a letter followed by the same letter in upper case
    let pair = text::lower().and_then(|c| char(c.to_ascii_uppercase()));
    assert_eq!(pair.parse("aAb"), Ok(ParseState::new('A', "b")));
    assert_eq!(pair.parse("aB"), Err(Failure::new("Invalid input: B")));
}

#[test]
fn linq_style_sequence() {
    let foo_bar = char('f')
        .then(char('o'))
        .then(char('o'))
        .then(char(' '))
        .then(char('b'))
        .then(char('a'))
        .then(char('r'))
        .map(|((((((f, o1), o2), s), b), a), r)| [f, o1, o2, s, b, a, r]);
    assert_eq!(
        foo_bar.parse("foo bar"),
        Ok(ParseState::new(['f', 'o', 'o', ' ', 'b', 'a', 'r'], ""))
    );
}

#[test]
fn failures_never_consume_input() {
    let speculative = string("abc").zero_or_one().then(string("abd"));
    assert_eq!(
        speculative.parse("abd"),
        Ok(ParseState::new((None, "abd".to_string()), ""))
    );
}

#[test]
fn parse_complete_is_the_explicit_choice_point() {
    let digits = text::natural();
    assert_eq!(digits.parse("12 apples"), Ok(ParseState::new(12, " apples")));
    assert_eq!(
        digits.parse_complete("12 apples"),
        Err(ParseError::Incomplete {
            offset: 2,
            remaining: " apples".to_string(),
        })
    );
    assert_eq!(digits.parse_complete("12"), Ok(12));
}

#[test]
fn deep_repetition_does_not_exhaust_the_stack() {
    let input = "ab".repeat(200_000);
    let pairs = string("ab").zero_or_more();
    let state = pairs.parse(&input).unwrap();
    assert_eq!(state.result.len(), 200_000);
    assert!(state.remaining.is_empty());

    let list = "1,".repeat(100_000) + "1";
    let items = text::digit().separated_by(char(','));
    assert_eq!(items.parse_complete(&list).map(|items| items.len()), Ok(100_001));
}
