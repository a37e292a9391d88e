use crate::assistant::timer::DEFAULT_FOCUS_MINUTES;
use crate::assistant::SessionEvent;

pub const HELP: &str = "\
Type anything to talk to Honey. Commands:
  /add <text>       add a task
  /done <n>         toggle task n
  /clear            clear all tasks
  /start [minutes]  start the focus timer (default 25)
  /stop             stop the timer
  /timer            show the timer
  /plan             ask Honey for a study plan
  /reset            clear the chat
  /listen           speak instead of typing
  /unlisten         stop listening
  /help             this text
  /quit             leave";

/// One line of terminal input, decoded
#[derive(Debug)]
pub enum Input {
    Event(SessionEvent),
    Listen,
    StopListening,
    Help,
    Quit,
    Nothing,
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Nothing;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Event(SessionEvent::UserText(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name.to_lowercase().as_str() {
        "add" => Input::Event(SessionEvent::AddTask(arg.to_string())),
        "done" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Event(SessionEvent::ToggleTask(n - 1)),
            _ => Input::Help,
        },
        "clear" => Input::Event(SessionEvent::ClearTasks),
        "start" => {
            let minutes = if arg.is_empty() {
                Some(DEFAULT_FOCUS_MINUTES)
            } else {
                arg.parse().ok()
            };
            match minutes {
                Some(minutes) => Input::Event(SessionEvent::StartTimer { minutes }),
                None => Input::Help,
            }
        }
        "stop" => Input::Event(SessionEvent::StopTimer),
        "timer" => Input::Event(SessionEvent::ShowTimer),
        "plan" => Input::Event(SessionEvent::AskPlan),
        "reset" => Input::Event(SessionEvent::ResetChat),
        "listen" => Input::Listen,
        "unlisten" => Input::StopListening,
        "quit" | "exit" => Input::Quit,
        _ => Input::Help,
    }
}
