//! The form: focus model, section switching, and the event loop.

pub mod events;
pub mod input;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::actions::{self, StatusLine};
use crate::config::Config;
use crate::session::Session;
use input::InputField;

/// The sections of the form, mirroring the original page's expanders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Chat,
    Upload,
    MultiUpload,
    Files,
    Publish,
}

impl Section {
    pub const ALL: [Section; 5] = [Section::Chat, Section::Upload, Section::MultiUpload, Section::Files, Section::Publish];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Chat => "Chat",
            Section::Upload => "Upload",
            Section::MultiUpload => "Multi-upload",
            Section::Files => "Files",
            Section::Publish => "Publish",
        }
    }
}

/// Where keystrokes go: a sidebar config field, a field of the current
/// section, or the file list (the Files section has no text input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Config(usize),
    Section(usize),
    FileList,
}

pub const CONFIG_FIELD_COUNT: usize = 5;

pub struct App {
    pub config_path: PathBuf,
    /// user, repo, token, branch, openai key — in sidebar order
    pub config_fields: [InputField; CONFIG_FIELD_COUNT],
    pub section: Section,
    pub chat_prompt: InputField,
    pub upload_path: InputField,
    pub upload_dest: InputField,
    pub multi_paths: InputField,
    pub multi_folder: InputField,
    pub publish_path: InputField,
    pub focus: Focus,
    pub session: Session,
    pub status: Option<StatusLine>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config_path,
            config_fields: [
                InputField::new("GitHub user").with_value(&config.github_user),
                InputField::new("Repository").with_value(&config.github_repo),
                InputField::secret("GitHub token").with_value(&config.github_token),
                InputField::new("Branch").with_value(&config.github_branch),
                InputField::secret("OpenAI API key").with_value(&config.openai_api_key),
            ],
            section: Section::Chat,
            chat_prompt: InputField::new("Prompt"),
            upload_path: InputField::new("Local file"),
            upload_dest: InputField::new("Destination path"),
            multi_paths: InputField::new("Local files"),
            multi_folder: InputField::new("Destination folder"),
            publish_path: InputField::new("HTML file"),
            focus: Focus::Config(0),
            session: Session::new(),
            status: None,
            should_quit: false,
        }
    }

    /// The configuration as currently typed into the sidebar.
    pub fn config_from_fields(&self) -> Config {
        Config {
            github_user: self.config_fields[0].value.clone(),
            github_repo: self.config_fields[1].value.clone(),
            github_token: self.config_fields[2].value.clone(),
            github_branch: self.config_fields[3].value.clone(),
            openai_api_key: self.config_fields[4].value.clone(),
        }
    }

    /// Number of text fields in the current section.
    pub fn section_field_count(&self) -> usize {
        match self.section {
            Section::Chat | Section::Publish => 1,
            Section::Upload | Section::MultiUpload => 2,
            Section::Files => 0,
        }
    }

    pub fn section_field(&self, idx: usize) -> Option<&InputField> {
        match (self.section, idx) {
            (Section::Chat, 0) => Some(&self.chat_prompt),
            (Section::Upload, 0) => Some(&self.upload_path),
            (Section::Upload, 1) => Some(&self.upload_dest),
            (Section::MultiUpload, 0) => Some(&self.multi_paths),
            (Section::MultiUpload, 1) => Some(&self.multi_folder),
            (Section::Publish, 0) => Some(&self.publish_path),
            _ => None,
        }
    }

    pub fn section_field_mut(&mut self, idx: usize) -> Option<&mut InputField> {
        match (self.section, idx) {
            (Section::Chat, 0) => Some(&mut self.chat_prompt),
            (Section::Upload, 0) => Some(&mut self.upload_path),
            (Section::Upload, 1) => Some(&mut self.upload_dest),
            (Section::MultiUpload, 0) => Some(&mut self.multi_paths),
            (Section::MultiUpload, 1) => Some(&mut self.multi_folder),
            (Section::Publish, 0) => Some(&mut self.publish_path),
            _ => None,
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        match self.focus {
            Focus::Config(i) => Some(&mut self.config_fields[i]),
            Focus::Section(i) => self.section_field_mut(i),
            Focus::FileList => None,
        }
    }

    /// Tab order: sidebar fields, then the section's fields (or the file
    /// list), then wrap.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Config(i) if i + 1 < CONFIG_FIELD_COUNT => Focus::Config(i + 1),
            Focus::Config(_) => self.first_section_focus(),
            Focus::Section(i) if i + 1 < self.section_field_count() => Focus::Section(i + 1),
            Focus::Section(_) | Focus::FileList => Focus::Config(0),
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Config(0) => match self.section_field_count() {
                0 => Focus::FileList,
                n => Focus::Section(n - 1),
            },
            Focus::Config(i) => Focus::Config(i - 1),
            Focus::Section(0) => Focus::Config(CONFIG_FIELD_COUNT - 1),
            Focus::Section(i) => Focus::Section(i - 1),
            Focus::FileList => Focus::Config(CONFIG_FIELD_COUNT - 1),
        };
    }

    fn first_section_focus(&self) -> Focus {
        if self.section_field_count() == 0 { Focus::FileList } else { Focus::Section(0) }
    }

    /// Switch section, moving focus into it. Entering Files with a stale
    /// cached listing refreshes it, like the original page's refresh flag.
    pub fn set_section(&mut self, section: Section) {
        self.section = section;
        self.focus = self.first_section_focus();
        if section == Section::Files && self.session.listing_stale && self.session.connected() {
            self.status = Some(actions::refresh_listing(&mut self.session));
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.should_quit {
            terminal.draw(|frame| crate::ui::render(frame, self))?;
            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                events::handle_key(self, key);
            }
        }
        Ok(())
    }
}
