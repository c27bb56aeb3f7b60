//! Screen model rendered from a `SessionState`.

use logion_core::session::SessionState;

pub const LOGION: &str = "Logion";
pub const ACCOUNT: &str = "Logion AccountId";
pub const IDENTITY_LOC: &str = "Logion ID LOC";
pub const COLLECTION_LOC: &str = "Collection LOC";
pub const INVITED_COLLECTION_LOC: &str = "Invited Contributor Collection LOC";
pub const HELP: &str = "Help";

/// A titled block of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<String>,
    /// REPL command available from this section, if any.
    pub action: Option<(&'static str, &'static str)>,
}

impl Section {
    fn new(title: &'static str, lines: Vec<String>) -> Self {
        Self {
            title,
            lines,
            action: None,
        }
    }

    fn with_action(mut self, command: &'static str, label: &'static str) -> Self {
        self.action = Some((command, label));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub sections: Vec<Section>,
}

impl SessionView {
    pub fn from_state(state: &SessionState) -> Self {
        let mut sections = Vec::new();

        match state.account() {
            None => sections.push(
                Section::new(LOGION, vec!["Not connected".to_string()])
                    .with_action("connect", "Connect to Logion"),
            ),
            Some(account) => sections.push(Section::new(ACCOUNT, vec![account.address.clone()])),
        }

        if state.identity_loc.is_settled() {
            let id = state
                .identity_loc
                .present()
                .map(|loc| loc.id.to_decimal_string());
            sections.push(Section::new(IDENTITY_LOC, vec![id_line(id)]));
        }

        if state.draft_collection.is_settled() {
            let draft = state.draft_collection.present();
            let mut section = Section::new(
                COLLECTION_LOC,
                vec![
                    id_line(draft.map(|d| d.data().id.to_decimal_string())),
                    format!("Files: {}", count_or_dash(draft.map(|d| d.data().files.len()))),
                ],
            );
            if draft.is_some() {
                section = section.with_action("add-file", "Add file");
            }
            sections.push(section);
        }

        if state.invited_contributor.is_settled() {
            let view = state.invited_contributor.present();
            let mut section = Section::new(
                INVITED_COLLECTION_LOC,
                vec![
                    id_line(view.map(|v| v.loc.data().id.to_decimal_string())),
                    format!("Records: {}", count_or_dash(view.map(|v| v.tokens_records))),
                ],
            );
            if view.is_some() {
                section = section.with_action("add-tokens-record", "Add tokens record");
            }
            sections.push(section);
        }

        sections.push(Section::new(
            HELP,
            vec!["Type `show` to refresh, `help` for all commands.".to_string()],
        ));

        Self { sections }
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

fn id_line(id: Option<String>) -> String {
    format!("ID: {}", id.unwrap_or_else(|| "None".to_string()))
}

fn count_or_dash(count: Option<usize>) -> String {
    count.map_or_else(|| "-".to_string(), |c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logion_core::account::AccountId;
    use logion_core::discovery::Discovery;
    use logion_core::loc::{LocData, LocId, LocKind, LocStatus};

    fn titles(view: &SessionView) -> Vec<&'static str> {
        view.sections.iter().map(|s| s.title).collect()
    }

    #[test]
    fn test_disconnected_view_offers_connect() {
        let view = SessionView::from_state(&SessionState::default());

        assert_eq!(titles(&view), vec![LOGION, HELP]);
        assert_eq!(
            view.section(LOGION).unwrap().action,
            Some(("connect", "Connect to Logion"))
        );
    }

    #[test]
    fn test_absent_records_show_none_and_dash() {
        let state = SessionState {
            identity_loc: Discovery::Absent,
            draft_collection: Discovery::Absent,
            invited_contributor: Discovery::Absent,
            ..SessionState::default()
        };
        let view = SessionView::from_state(&state);

        assert_eq!(view.section(IDENTITY_LOC).unwrap().lines, vec!["ID: None"]);
        let collection = view.section(COLLECTION_LOC).unwrap();
        assert_eq!(collection.lines, vec!["ID: None", "Files: -"]);
        assert!(collection.action.is_none());
        let invited = view.section(INVITED_COLLECTION_LOC).unwrap();
        assert_eq!(invited.lines, vec!["ID: None", "Records: -"]);
        assert!(invited.action.is_none());
    }

    #[test]
    fn test_identity_loc_id_is_decimal() {
        let id = LocId::from_any_string("d61e2e12-6c06-4425-aeee-2a0e969ac14e").unwrap();
        let state = SessionState {
            identity_loc: Discovery::Present(LocData {
                id,
                kind: LocKind::Identity,
                status: LocStatus::Closed,
                owner: AccountId::polkadot("5Officer").unwrap(),
                requester: None,
                files: Vec::new(),
            }),
            ..SessionState::default()
        };
        let view = SessionView::from_state(&state);

        assert_eq!(
            view.section(IDENTITY_LOC).unwrap().lines,
            vec![format!("ID: {}", id.to_decimal_string())]
        );
    }
}
