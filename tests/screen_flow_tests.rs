//! Conversation flow tests
//!
//! These tests drive AppState the way the widgets do and check the screen
//! transitions, the recording state machine and the request lifecycle.

use crossbeam_channel::{unbounded, Receiver, Sender};
use pastport::api::{ApiCommand, ApiEvent, ChatResponse};
use pastport::audio::{CapturedAudio, PlaybackState};
use pastport::personas;
use pastport::screen::Screen;
use pastport::session::{
    Role, AUDIO_FALLBACK_TEXT, GREETING, HISTORY_WINDOW, NO_REPLY_TEXT,
    TRANSCRIPTION_UNAVAILABLE_TEXT,
};
use pastport::ui::{AppState, RecordingState};
use pastport::PastportError;
use uuid::Uuid;

struct Backend {
    commands: Receiver<ApiCommand>,
    events: Sender<ApiEvent>,
}

impl Backend {
    fn next_chat(&self) -> (Uuid, String, Vec<pastport::session::HistoryEntry>) {
        match self.commands.try_recv() {
            Ok(ApiCommand::Chat {
                request_id,
                message,
                history,
                ..
            }) => (request_id, message, history),
            other => panic!("expected a chat command, got {other:?}"),
        }
    }

    fn next_transcribe(&self) -> Uuid {
        match self.commands.try_recv() {
            Ok(ApiCommand::Transcribe { request_id, .. }) => request_id,
            other => panic!("expected a transcription command, got {other:?}"),
        }
    }

    fn reply(&self, request_id: Uuid, response: ChatResponse) {
        self.events
            .send(ApiEvent::ChatCompleted {
                request_id,
                result: Ok(response),
            })
            .unwrap();
    }
}

fn chat_with(persona_id: &str) -> (AppState, Backend) {
    let (command_tx, command_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();
    let mut state = AppState::new().with_api(command_tx, event_rx);
    state.audio_input_available = true;
    state.audio_output_available = true;
    state.get_started();
    state.select_persona(personas::find(persona_id).unwrap());
    (
        state,
        Backend {
            commands: command_rx,
            events: event_tx,
        },
    )
}

fn say(state: &mut AppState, text: &str) {
    state.session_mut().unwrap().input_text = text.into();
    state.send_message();
}

/// One second of quiet noise at 16 kHz
fn take() -> CapturedAudio {
    CapturedAudio::new(vec![0.01; 16_000], 16_000)
}

#[test]
fn test_full_navigation_cycle() {
    let mut state = AppState::new();
    assert_eq!(state.screen(), Screen::Welcome);

    state.get_started();
    assert_eq!(state.screen(), Screen::Selection);

    state.select_persona(personas::find("cleopatra").unwrap());
    assert_eq!(state.screen(), Screen::Chat);
    assert_eq!(state.session().unwrap().persona().name, "Cleopatra VII");

    state.go_back();
    assert_eq!(state.screen(), Screen::Selection);
    assert!(state.session().is_none());

    state.go_back();
    assert_eq!(state.screen(), Screen::Welcome);
}

#[test]
fn test_new_chat_starts_with_greeting_only() {
    let (state, backend) = chat_with("gandhi");

    let messages = state.session().unwrap().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, GREETING);
    assert!(messages[0].is_from_persona());
    assert!(backend.commands.try_recv().is_err());
}

#[test]
fn test_history_is_capped_after_many_turns() {
    let (mut state, backend) = chat_with("einstein");

    for turn in 0..5 {
        say(&mut state, &format!("question {turn}"));
        let (request_id, _, _) = backend.next_chat();
        backend.reply(request_id, ChatResponse::new(format!("answer {turn}")));
        state.poll_events();
    }

    say(&mut state, "last question");
    let (_, message, history) = backend.next_chat();

    assert_eq!(message, "last question");
    assert_eq!(history.len(), HISTORY_WINDOW);
    assert_eq!(history[0].role, Role::Assistant);
    assert_eq!(history[0].text, "answer 2");
    assert_eq!(history.last().unwrap().role, Role::User);
    assert_eq!(history.last().unwrap().text, "last question");
    assert!(history.iter().all(|entry| entry.text != GREETING));
}

#[test]
fn test_blank_reply_gets_placeholder() {
    let (mut state, backend) = chat_with("einstein");
    say(&mut state, "Hello?");
    let (request_id, _, _) = backend.next_chat();

    backend.reply(request_id, ChatResponse::default());
    state.poll_events();

    let last = state.session().unwrap().messages().last().unwrap();
    assert_eq!(last.text, NO_REPLY_TEXT);
    assert!(!state.is_loading());
}

#[test]
fn test_duplicate_response_is_ignored() {
    let (mut state, backend) = chat_with("einstein");
    say(&mut state, "Hello");
    let (request_id, _, _) = backend.next_chat();

    backend.reply(request_id, ChatResponse::new("first"));
    backend.reply(request_id, ChatResponse::new("second"));
    state.poll_events();

    let texts: Vec<&str> = state
        .session()
        .unwrap()
        .messages()
        .iter()
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(texts, vec![GREETING, "Hello", "first"]);
}

#[test]
fn test_send_without_worker_reports_failure() {
    let mut state = AppState::new();
    state.get_started();
    state.select_persona(personas::find("einstein").unwrap());

    say(&mut state, "Anyone there?");

    let session = state.session().unwrap();
    assert!(!session.is_loading());
    assert_eq!(session.messages().len(), 3);
    assert_eq!(session.messages()[1].text, "Anyone there?");
}

#[test]
fn test_recording_needs_a_microphone() {
    let (mut state, _backend) = chat_with("einstein");
    state.audio_input_available = false;

    state.start_recording();

    assert_eq!(state.recording_state, RecordingState::Idle);
}

#[test]
fn test_recording_blocked_while_loading() {
    let (mut state, _backend) = chat_with("einstein");
    say(&mut state, "Hello");

    state.start_recording();

    assert_eq!(state.recording_state, RecordingState::Idle);
}

#[test]
fn test_recording_round_trip() {
    let (mut state, backend) = chat_with("gandhi");

    state.start_recording();
    assert_eq!(state.recording_state, RecordingState::Recording);

    state.stop_recording();
    assert_eq!(state.recording_state, RecordingState::Processing);

    state.finish_recording(take());
    assert_eq!(state.recording_state, RecordingState::Processing);
    assert!(state.is_loading());

    let request_id = backend.next_transcribe();
    backend
        .events
        .send(ApiEvent::TranscriptionCompleted {
            request_id,
            result: Ok(ChatResponse::new("Be the change.")),
        })
        .unwrap();
    state.poll_events();

    assert_eq!(state.recording_state, RecordingState::Idle);
    let messages = state.session().unwrap().messages();
    assert_eq!(messages[1].text, AUDIO_FALLBACK_TEXT);
    assert_eq!(messages[2].text, "Be the change.");
}

#[test]
fn test_short_take_is_discarded() {
    let (mut state, backend) = chat_with("gandhi");
    state.start_recording();
    state.stop_recording();

    state.finish_recording(CapturedAudio::new(vec![0.0; 1_000], 16_000));

    assert_eq!(state.recording_state, RecordingState::Idle);
    assert!(state.last_error.is_some());
    assert!(!state.is_loading());
    assert!(backend.commands.try_recv().is_err());
}

#[test]
fn test_transcription_unavailable_message() {
    let (mut state, backend) = chat_with("cleopatra");
    state.start_recording();
    state.stop_recording();
    state.finish_recording(take());
    let request_id = backend.next_transcribe();

    backend
        .events
        .send(ApiEvent::TranscriptionCompleted {
            request_id,
            result: Err(PastportError::TranscriptionUnavailable(
                "transcribe_unavailable".into(),
            )),
        })
        .unwrap();
    state.poll_events();

    assert_eq!(state.recording_state, RecordingState::Idle);
    let last = state.session().unwrap().messages().last().unwrap();
    assert_eq!(last.text, TRANSCRIPTION_UNAVAILABLE_TEXT);
}

#[test]
fn test_leaving_chat_while_recording_resets() {
    let (mut state, _backend) = chat_with("einstein");
    state.start_recording();

    state.go_back();

    assert_eq!(state.recording_state, RecordingState::Idle);
    assert_eq!(state.screen(), Screen::Selection);
}

#[test]
fn test_reply_audio_is_fetched_and_offered() {
    let (mut state, backend) = chat_with("einstein");
    say(&mut state, "Play me something");
    let (request_id, _, _) = backend.next_chat();

    backend.reply(
        request_id,
        ChatResponse::new("Listen.").with_audio_url("/api/audio/e.mp3"),
    );
    state.poll_events();

    assert_eq!(state.replay.state(), PlaybackState::Loading);
    let url = match backend.commands.try_recv() {
        Ok(ApiCommand::FetchAudio { url }) => url,
        other => panic!("expected an audio fetch, got {other:?}"),
    };
    assert_eq!(url, "/api/audio/e.mp3");

    backend
        .events
        .send(ApiEvent::AudioFetched {
            url,
            result: Ok(vec![1, 2, 3]),
        })
        .unwrap();
    state.poll_events();

    assert_eq!(state.replay.take_ready_audio(), Some(vec![1, 2, 3]));
    state.replay.mark_loaded(None, false);
    assert_eq!(state.replay.toggle(), Some(PlaybackState::Playing));
    assert_eq!(state.replay.toggle(), Some(PlaybackState::Paused));
}

#[test]
fn test_reply_without_audio_clears_replay() {
    let (mut state, backend) = chat_with("einstein");
    say(&mut state, "First");
    let (request_id, _, _) = backend.next_chat();
    backend.reply(request_id, ChatResponse::new("One.").with_audio_url("/api/audio/1.mp3"));
    state.poll_events();
    let _ = backend.commands.try_recv();

    say(&mut state, "Second");
    let (request_id, _, _) = backend.next_chat();
    backend.reply(request_id, ChatResponse::new("Two."));
    state.poll_events();

    assert_eq!(state.replay.url(), None);
    assert_eq!(state.replay.state(), PlaybackState::Idle);
    assert!(state.replay.toggle().is_none());
}

#[test]
fn test_no_speakers_marks_replay_unavailable() {
    let (mut state, backend) = chat_with("gandhi");
    state.audio_output_available = false;
    say(&mut state, "Speak");
    let (request_id, _, _) = backend.next_chat();

    backend.reply(request_id, ChatResponse::new("...").with_audio_url("/api/audio/g.mp3"));
    state.poll_events();

    assert_eq!(state.replay.state(), PlaybackState::Unavailable);
    assert!(backend.commands.try_recv().is_err());
}

#[test]
fn test_worker_shutdown_detaches_commands() {
    let (mut state, backend) = chat_with("einstein");
    backend.events.send(ApiEvent::Shutdown).unwrap();
    state.poll_events();

    assert!(state.api_command_tx.is_none());

    say(&mut state, "Still there?");
    assert!(!state.is_loading());
}
