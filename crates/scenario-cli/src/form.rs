//! Interactive form
//!
//! Line-oriented commands edit a [`ScenarioInput`] and drive a
//! [`RequestController`]. Input keeps being read while a request is
//! outstanding; a second `submit` is refused until it settles.

use crate::config::OutputFormat;
use crate::output;
use futures::future::BoxFuture;
use scenario_core::{
    AnalysisResult, AnalysisTransport, RequestController, ScenarioInput, SubmissionState,
    SubmitError,
};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  scenario <text>    set the scenario description
  add                append an empty constraint
  set <n> <text>     replace constraint n
  remove <n>         delete constraint n
  show               print the form and the current analysis
  submit             send the scenario for analysis
  help               show this help
  quit               exit";

/// One parsed form command
///
/// Constraint indices are zero-based; the command syntax is one-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Scenario(String),
    Add,
    Set { index: usize, text: String },
    Remove(usize),
    Show,
    Submit,
    Help,
    Quit,
}

/// Command parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help' for commands)")]
    Unknown(String),

    #[error("'{0}' needs a constraint number")]
    MissingIndex(&'static str),

    #[error("invalid constraint number '{0}'")]
    InvalidIndex(String),
}

impl FormCommand {
    /// Parse one input line
    ///
    /// Text arguments are kept verbatim after the single separator following
    /// the command word.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "scenario" => Ok(Self::Scenario(rest.to_string())),
            "add" => Ok(Self::Add),
            "set" => {
                let (number, text) = rest
                    .trim_start()
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest.trim(), ""));
                let index = parse_index("set", number)?;
                Ok(Self::Set {
                    index,
                    text: text.to_string(),
                })
            }
            "remove" | "rm" => Ok(Self::Remove(parse_index("remove", rest.trim())?)),
            "show" => Ok(Self::Show),
            "submit" => Ok(Self::Submit),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_index(command: &'static str, number: &str) -> Result<usize, CommandError> {
    if number.is_empty() {
        return Err(CommandError::MissingIndex(command));
    }
    match number.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidIndex(number.to_string())),
    }
}

/// What the event loop does after a command
#[derive(Debug)]
pub enum Effect {
    Continue,
    /// Send this payload through the transport
    Send(scenario_core::AnalysisRequest),
    Quit,
}

/// Form state plus the output it writes to
pub struct FormSession<W> {
    input: ScenarioInput,
    controller: RequestController,
    format: OutputFormat,
    out: W,
    quitting: bool,
}

impl<W: Write> FormSession<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            input: ScenarioInput::new(),
            controller: RequestController::new(),
            format,
            out,
            quitting: false,
        }
    }

    pub fn input(&self) -> &ScenarioInput {
        &self.input
    }

    pub fn state(&self) -> &SubmissionState {
        self.controller.state()
    }

    pub fn requests_issued(&self) -> u64 {
        self.controller.requests_issued()
    }

    /// Quit was requested while a request is outstanding
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn intro(&mut self) -> io::Result<()> {
        writeln!(self.out, "Scenario analyzer. Type 'help' for commands.")?;
        self.write_form()
    }

    /// Print a one-line message
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    pub fn handle(&mut self, command: FormCommand) -> io::Result<Effect> {
        match command {
            FormCommand::Scenario(text) => {
                self.input.set_scenario_text(text);
                self.write_form()?;
            }
            FormCommand::Add => {
                self.input.add_constraint();
                self.write_form()?;
            }
            FormCommand::Set { index, text } => {
                if self.input.update_constraint(index, text) {
                    self.write_form()?;
                } else {
                    self.no_such_constraint(index)?;
                }
            }
            FormCommand::Remove(index) => {
                if self.input.remove_constraint(index).is_some() {
                    self.write_form()?;
                } else {
                    self.no_such_constraint(index)?;
                }
            }
            FormCommand::Show => {
                self.write_form()?;
                self.write_status()?;
                self.write_result()?;
            }
            FormCommand::Submit => return self.submit(),
            FormCommand::Help => writeln!(self.out, "{HELP}")?,
            FormCommand::Quit => {
                if !self.controller.is_loading() {
                    return Ok(Effect::Quit);
                }
                self.quitting = true;
                writeln!(self.out, "Waiting for the pending analysis to finish...")?;
            }
        }
        Ok(Effect::Continue)
    }

    fn submit(&mut self) -> io::Result<Effect> {
        if let Err(e) = self.input.check_required() {
            writeln!(self.out, "Cannot submit: {e}")?;
            return Ok(Effect::Continue);
        }

        match self.controller.begin_submit(&self.input) {
            Some(request) => {
                writeln!(self.out, "Loading...")?;
                Ok(Effect::Send(request))
            }
            None => {
                writeln!(self.out, "An analysis is already in progress.")?;
                Ok(Effect::Continue)
            }
        }
    }

    /// Apply the outcome of the outstanding request and print it
    pub fn settle(&mut self, outcome: Result<AnalysisResult, SubmitError>) -> io::Result<Effect> {
        if let Err(e) = self.controller.settle(outcome) {
            tracing::warn!("dropping unexpected outcome: {}", e);
            return Ok(Effect::Continue);
        }

        self.write_status()?;
        self.write_result()?;

        if self.quitting {
            Ok(Effect::Quit)
        } else {
            Ok(Effect::Continue)
        }
    }

    fn no_such_constraint(&mut self, index: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "No constraint {} (there are {}).",
            index + 1,
            self.input.constraints().len()
        )
    }

    fn write_form(&mut self) -> io::Result<()> {
        let scenario = self.input.scenario_text();
        if scenario.is_empty() {
            writeln!(self.out, "Scenario: (empty)")?;
        } else {
            writeln!(self.out, "Scenario: {scenario}")?;
        }

        let constraints = self.input.constraints();
        if constraints.is_empty() {
            return writeln!(self.out, "Constraints: (none)");
        }
        writeln!(self.out, "Constraints:")?;
        for (i, text) in constraints.iter().enumerate() {
            if text.is_empty() {
                writeln!(self.out, "  {}. (empty)", i + 1)?;
            } else {
                writeln!(self.out, "  {}. {text}", i + 1)?;
            }
        }
        Ok(())
    }

    fn write_status(&mut self) -> io::Result<()> {
        match self.controller.state() {
            SubmissionState::Idle => Ok(()),
            SubmissionState::Loading => writeln!(self.out, "Loading..."),
            SubmissionState::Succeeded(_) => writeln!(self.out, "Analysis complete."),
            SubmissionState::Failed(message) => writeln!(self.out, "Error: {message}"),
        }
    }

    fn write_result(&mut self) -> io::Result<()> {
        let rendered = output::render(self.controller.state(), self.format).map_err(io::Error::other)?;
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()
    }
}

type InFlight = BoxFuture<'static, Result<AnalysisResult, SubmitError>>;

/// Run the form until `quit` or end of input
///
/// At end of input an outstanding request is still awaited and reported.
/// Lines that are not valid UTF-8 are decoded lossily; a read error closes
/// input the same way end of input does.
pub async fn run<R, W>(
    mut reader: R,
    session: &mut FormSession<W>,
    transport: Arc<dyn AnalysisTransport>,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    session.intro()?;

    // Survives cancelled reads, so a partial line is resumed.
    let mut buf = Vec::new();
    let mut input_open = true;
    let mut in_flight: Option<InFlight> = None;

    loop {
        if (!input_open || session.quitting()) && in_flight.is_none() {
            break;
        }

        tokio::select! {
            // Pending input is handled before a completed response.
            biased;

            read = reader.read_until(b'\n', &mut buf), if input_open && !session.quitting() => {
                match read {
                    Ok(0) => {
                        input_open = false;
                        continue;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("stopped reading input: {}", e);
                        session.notice(&format!("Input closed: {e}"))?;
                        buf.clear();
                        input_open = false;
                        continue;
                    }
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                buf.clear();

                let command = match FormCommand::parse(&line) {
                    Ok(command) => command,
                    Err(CommandError::Empty) => continue,
                    Err(e) => {
                        session.notice(&e.to_string())?;
                        continue;
                    }
                };
                match session.handle(command)? {
                    Effect::Continue => {}
                    Effect::Quit => break,
                    Effect::Send(request) => {
                        let transport = Arc::clone(&transport);
                        in_flight = Some(Box::pin(async move { transport.analyze(&request).await }));
                    }
                }
            }

            outcome = settle_in_flight(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                if let Effect::Quit = session.settle(outcome)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

async fn settle_in_flight(in_flight: &mut Option<InFlight>) -> Result<AnalysisResult, SubmitError> {
    match in_flight {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scenario_core::Phase;
    use scenario_test_utils::{launch_result, ScriptedTransport};

    fn session() -> FormSession<Vec<u8>> {
        FormSession::new(Vec::new(), OutputFormat::Text)
    }

    fn output(session: FormSession<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            FormCommand::parse("scenario Launch a product"),
            Ok(FormCommand::Scenario("Launch a product".to_string()))
        );
        assert_eq!(FormCommand::parse("  add"), Ok(FormCommand::Add));
        assert_eq!(
            FormCommand::parse("set 2 Timeline: 3 months"),
            Ok(FormCommand::Set {
                index: 1,
                text: "Timeline: 3 months".to_string()
            })
        );
        assert_eq!(FormCommand::parse("remove 1"), Ok(FormCommand::Remove(0)));
        assert_eq!(FormCommand::parse("SUBMIT"), Ok(FormCommand::Submit));
        assert_eq!(FormCommand::parse("exit"), Ok(FormCommand::Quit));
    }

    #[test]
    fn set_without_text_clears_the_field() {
        assert_eq!(
            FormCommand::parse("set 1"),
            Ok(FormCommand::Set {
                index: 0,
                text: String::new()
            })
        );
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!(FormCommand::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            FormCommand::parse("launch"),
            Err(CommandError::Unknown("launch".to_string()))
        );
        assert_eq!(FormCommand::parse("remove"), Err(CommandError::MissingIndex("remove")));
        assert_eq!(
            FormCommand::parse("set 0 text"),
            Err(CommandError::InvalidIndex("0".to_string()))
        );
        assert_eq!(
            FormCommand::parse("remove x"),
            Err(CommandError::InvalidIndex("x".to_string()))
        );
    }

    #[test]
    fn edits_update_input() {
        let mut session = session();
        session.handle(FormCommand::Scenario("Launch".to_string())).unwrap();
        session
            .handle(FormCommand::Set {
                index: 0,
                text: "Budget".to_string(),
            })
            .unwrap();
        session.handle(FormCommand::Add).unwrap();
        session
            .handle(FormCommand::Set {
                index: 1,
                text: "Timeline".to_string(),
            })
            .unwrap();
        session.handle(FormCommand::Remove(0)).unwrap();

        let constraints: Vec<_> = session.input().constraints().iter().collect();
        assert_eq!(constraints, vec!["Timeline"]);
        assert_eq!(session.input().scenario_text(), "Launch");
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut session = session();
        session.handle(FormCommand::Remove(4)).unwrap();
        assert_eq!(session.input().constraints().len(), 1);
        assert!(output(session).contains("No constraint 5 (there are 1)."));
    }

    #[test]
    fn submit_requires_filled_fields() {
        let mut session = session();
        let effect = session.handle(FormCommand::Submit).unwrap();
        assert!(matches!(effect, Effect::Continue));
        assert_eq!(session.state().phase(), Phase::Idle);
        assert!(output(session).contains("Cannot submit: scenario is required"));
    }

    #[test]
    fn quit_while_loading_waits() {
        let mut session = session();
        session.handle(FormCommand::Scenario("Launch".to_string())).unwrap();
        session.handle(FormCommand::Set { index: 0, text: "Budget".to_string() }).unwrap();

        assert!(matches!(session.handle(FormCommand::Submit).unwrap(), Effect::Send(_)));
        assert!(matches!(session.handle(FormCommand::Quit).unwrap(), Effect::Continue));
        assert!(session.quitting());

        let effect = session.settle(Ok(launch_result())).unwrap();
        assert!(matches!(effect, Effect::Quit));
    }

    #[tokio::test]
    async fn run_submits_and_prints_analysis() {
        let transport = Arc::new(ScriptedTransport::new().with_reply(Ok(launch_result())));
        let script = "scenario Launch a product\nset 1 Budget: $10,000\nsubmit\n";
        let mut session = session();

        run(script.as_bytes(), &mut session, transport.clone()).await.unwrap();

        assert_eq!(transport.calls(), 1);
        let request = &transport.requests()[0];
        assert_eq!(request.scenario, "Launch a product");
        assert_eq!(request.constraints, vec!["Budget: $10,000".to_string()]);

        assert_eq!(session.state().phase(), Phase::Succeeded);
        let out = output(session);
        assert!(out.contains("Loading..."));
        assert!(out.contains("Analysis complete."));
        assert!(out.contains("Proposed Strategies"));
    }

    #[tokio::test]
    async fn second_submit_while_loading_is_refused() {
        let transport = Arc::new(ScriptedTransport::new().with_reply(Ok(launch_result())));
        let script = "scenario Launch\nset 1 Budget\nsubmit\nsubmit\n";
        let mut session = session();

        run(script.as_bytes(), &mut session, transport.clone()).await.unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(session.requests_issued(), 1);
        assert!(output(session).contains("An analysis is already in progress."));
    }

    #[tokio::test]
    async fn failure_is_shown_with_placeholder() {
        let transport = Arc::new(
            ScriptedTransport::new().with_reply(Err(SubmitError::status(500, "Internal Server Error"))),
        );
        let script = "scenario Launch\nset 1 Budget\nsubmit\n";
        let mut session = session();

        run(script.as_bytes(), &mut session, transport).await.unwrap();

        assert_eq!(
            session.state().error_message(),
            Some("API error: Internal Server Error")
        );
        let out = output(session);
        assert!(out.contains("Error: API error: Internal Server Error\nNo analysis yet.\n"));
    }

    #[test]
    fn edits_apply_while_loading() {
        let mut session = session();
        session.handle(FormCommand::Scenario("Launch".to_string())).unwrap();
        session.handle(FormCommand::Set { index: 0, text: "Budget".to_string() }).unwrap();
        assert!(matches!(session.handle(FormCommand::Submit).unwrap(), Effect::Send(_)));

        session
            .handle(FormCommand::Set {
                index: 0,
                text: "Budget: $5,000".to_string(),
            })
            .unwrap();
        session.handle(FormCommand::Add).unwrap();
        session.handle(FormCommand::Scenario("Relaunch".to_string())).unwrap();

        assert!(session.state().is_loading());
        let constraints: Vec<_> = session.input().constraints().iter().collect();
        assert_eq!(constraints, vec!["Budget: $5,000", ""]);
        assert_eq!(session.input().scenario_text(), "Relaunch");
    }

    #[tokio::test]
    async fn invalid_utf8_line_keeps_request_alive() {
        let transport = Arc::new(ScriptedTransport::new().with_reply(Ok(launch_result())));
        let script: &[u8] = b"scenario Launch\nset 1 Budget\nsubmit\nset 1 caf\xE9\n";
        let mut session = session();

        run(script, &mut session, transport.clone()).await.unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(session.state().phase(), Phase::Succeeded);
        assert_eq!(session.input().constraints().get(0), Some("caf\u{FFFD}"));
    }

    struct BrokenInput;

    impl tokio::io::AsyncRead for BrokenInput {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _: &mut std::task::Context<'_>,
            _: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<io::Result<()>> {
            std::task::Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed")))
        }
    }

    #[tokio::test]
    async fn read_error_still_awaits_pending_request() {
        use tokio::io::AsyncReadExt;

        let transport = Arc::new(ScriptedTransport::new().with_reply(Ok(launch_result())));
        let script: &[u8] = b"scenario Launch\nset 1 Budget\nsubmit\n";
        let reader = tokio::io::BufReader::new(script.chain(BrokenInput));
        let mut session = session();

        run(reader, &mut session, transport.clone()).await.unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(session.state().phase(), Phase::Succeeded);
        let out = output(session);
        assert!(out.contains("Input closed: stdin closed"));
        assert!(out.contains("Analysis complete."));
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let transport = Arc::new(ScriptedTransport::new());
        let script = "quit\nscenario ignored\n";
        let mut session = session();

        run(script.as_bytes(), &mut session, transport).await.unwrap();

        assert_eq!(session.input().scenario_text(), "");
    }
}
