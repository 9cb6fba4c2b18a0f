// 🪟 Form and view state
//
// The visible panel is one enum value derived from the latest LookupResult,
// so "result and error shown at once" cannot be represented.
//
// Passwords are never stored or displayed; the credentials affordance only
// shows a fixed notice and never reaches the resolver.

use crate::directory::Directory;
use crate::ime::InputMethod;
use crate::resolver::{InvalidReason, LookupResult, Resolver};
use serde::{Deserialize, Serialize};

pub const MSG_NOT_FOUND: &str = "일치하는 정보를 찾지 못했습니다.";
pub const MSG_MISSING_FIELDS: &str = "학번과 이름을 모두 입력하세요.";
pub const MSG_IDENTIFIER_NOT_NUMERIC: &str = "학번은 숫자만 입력하세요.";
pub const DEFAULT_RESET_NOTICE: &str =
    "비밀번호는 보안상 표시하지 않습니다.\n관리자 재설정 또는 안내된 절차로 재설정해 주세요.";

/// Placeholder shown in the account slot while nothing has been found
pub const EMPTY_ACCOUNT: &str = "-";

// ============================================================================
// VIEW STATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ViewState {
    /// Nothing searched yet (or the form was reset)
    #[default]
    Prompt,
    /// Account found
    Result { account_id: String },
    /// Validation failure or no match
    Error { message: String },
}

impl ViewState {
    pub fn from_result(result: &LookupResult) -> Self {
        match result {
            LookupResult::Found { account_id } => ViewState::Result {
                account_id: account_id.clone(),
            },
            LookupResult::NotFound => ViewState::Error {
                message: MSG_NOT_FOUND.to_string(),
            },
            LookupResult::Invalid { reason } => ViewState::Error {
                message: invalid_message(*reason).to_string(),
            },
        }
    }

    /// What the account slot shows
    pub fn account_display(&self) -> &str {
        match self {
            ViewState::Result { account_id } => account_id,
            _ => EMPTY_ACCOUNT,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message } => Some(message),
            _ => None,
        }
    }
}

pub fn invalid_message(reason: InvalidReason) -> &'static str {
    match reason {
        InvalidReason::MissingFields => MSG_MISSING_FIELDS,
        InvalidReason::IdentifierNotNumeric => MSG_IDENTIFIER_NOT_NUMERIC,
    }
}

// ============================================================================
// LOOKUP FORM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Identifier,
    Name,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Identifier => Field::Name,
            Field::Name => Field::Identifier,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Identifier => "학번",
            Field::Name => "이름",
        }
    }
}

/// Two text inputs plus the panel currently shown
#[derive(Debug, Clone)]
pub struct LookupForm {
    pub identifier: String,
    pub name: String,
    pub focus: Field,
    view: ViewState,
    last_result: Option<LookupResult>,
}

impl LookupForm {
    pub fn new() -> Self {
        LookupForm {
            identifier: String::new(),
            name: String::new(),
            focus: Field::Identifier,
            view: ViewState::Prompt,
            last_result: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn last_result(&self) -> Option<&LookupResult> {
        self.last_result.as_ref()
    }

    pub fn focused_input(&self) -> &str {
        match self.focus {
            Field::Identifier => &self.identifier,
            Field::Name => &self.name,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Identifier => &mut self.identifier,
            Field::Name => &mut self.name,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.focused_input_mut().push(c);
    }

    pub fn delete_char(&mut self) {
        self.focused_input_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// Resolve the current inputs and show the outcome
    pub fn submit<D: Directory, I: InputMethod>(
        &mut self,
        resolver: &Resolver<D, I>,
    ) -> &ViewState {
        let result = resolver.resolve(&self.identifier, &self.name);
        self.view = ViewState::from_result(&result);
        self.last_result = Some(result);
        &self.view
    }

    /// Clear inputs, focus the identifier and go back to the prompt
    pub fn reset(&mut self) {
        *self = LookupForm::new();
    }
}

impl Default for LookupForm {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;

    fn resolver() -> Resolver<StaticDirectory> {
        Resolver::new(StaticDirectory::embedded())
    }

    #[test]
    fn test_view_from_result() {
        let found = LookupResult::Found {
            account_id: "a@b".to_string(),
        };
        assert_eq!(
            ViewState::from_result(&found),
            ViewState::Result {
                account_id: "a@b".to_string()
            }
        );

        assert_eq!(
            ViewState::from_result(&LookupResult::NotFound).error_message(),
            Some(MSG_NOT_FOUND)
        );

        let missing = LookupResult::Invalid {
            reason: InvalidReason::MissingFields,
        };
        assert_eq!(ViewState::from_result(&missing).error_message(), Some(MSG_MISSING_FIELDS));

        let not_numeric = LookupResult::Invalid {
            reason: InvalidReason::IdentifierNotNumeric,
        };
        assert_eq!(
            ViewState::from_result(&not_numeric).error_message(),
            Some(MSG_IDENTIFIER_NOT_NUMERIC)
        );
    }

    #[test]
    fn test_account_display() {
        assert_eq!(ViewState::Prompt.account_display(), EMPTY_ACCOUNT);
        assert_eq!(
            ViewState::Error {
                message: "x".to_string()
            }
            .account_display(),
            EMPTY_ACCOUNT
        );
        assert_eq!(
            ViewState::Result {
                account_id: "a@b".to_string()
            }
            .account_display(),
            "a@b"
        );
    }

    #[test]
    fn test_form_starts_at_prompt() {
        let form = LookupForm::new();
        assert_eq!(form.view(), &ViewState::Prompt);
        assert_eq!(form.focus, Field::Identifier);
        assert!(form.last_result().is_none());
    }

    #[test]
    fn test_form_typing_and_focus() {
        let mut form = LookupForm::new();
        for c in "30101".chars() {
            form.insert_char(c);
        }
        form.next_field();
        for c in "홍길동x".chars() {
            form.insert_char(c);
        }
        form.delete_char();

        assert_eq!(form.identifier, "30101");
        assert_eq!(form.name, "홍길동");
        assert_eq!(form.focused_input(), "홍길동");

        form.next_field();
        assert_eq!(form.focus, Field::Identifier);
    }

    #[test]
    fn test_form_submit_transitions() {
        let r = resolver();
        let mut form = LookupForm::new();

        form.submit(&r);
        assert_eq!(form.view().error_message(), Some(MSG_MISSING_FIELDS));

        form.identifier = "30101".to_string();
        form.name = "홍 길동".to_string();
        form.submit(&r);
        assert_eq!(form.view().account_display(), "30101.hong@school.example");
        assert!(form.view().error_message().is_none());

        form.name = "김철수".to_string();
        form.submit(&r);
        assert_eq!(form.view().error_message(), Some(MSG_NOT_FOUND));
        assert_eq!(form.view().account_display(), EMPTY_ACCOUNT);
        assert_eq!(form.last_result(), Some(&LookupResult::NotFound));
    }

    #[test]
    fn test_form_reset() {
        let r = resolver();
        let mut form = LookupForm::new();
        form.identifier = "30101".to_string();
        form.name = "홍길동".to_string();
        form.focus = Field::Name;
        form.submit(&r);

        form.reset();
        assert!(form.identifier.is_empty());
        assert!(form.name.is_empty());
        assert_eq!(form.focus, Field::Identifier);
        assert_eq!(form.view(), &ViewState::Prompt);
        assert!(form.last_result().is_none());
    }

    #[test]
    fn test_view_json_shape() {
        let json = serde_json::to_value(ViewState::Prompt).unwrap();
        assert_eq!(json, serde_json::json!({"state": "prompt"}));

        let json = serde_json::to_value(ViewState::Result {
            account_id: "a@b".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"state": "result", "account_id": "a@b"}));
    }
}
