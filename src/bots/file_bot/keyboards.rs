use dersbot::models::{Button, Material};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const BACK_BUTTON_LABEL: &str = "⬅️ Back to Subjects";
pub const BACK_CALLBACK_DATA: &str = "back_subjects";

fn subject_rows(buttons: &[Button]) -> Vec<Vec<InlineKeyboardButton>> {
    buttons
        .iter()
        .map(|button| {
            vec![InlineKeyboardButton::callback(
                button.name.clone(),
                format!("subj_{}", button.name),
            )]
        })
        .collect()
}

fn back_row() -> Vec<InlineKeyboardButton> {
    vec![InlineKeyboardButton::callback(
        BACK_BUTTON_LABEL,
        BACK_CALLBACK_DATA,
    )]
}

/// Top-level subject listing, one subject per row.
pub fn build_subject_keyboard(buttons: &[Button]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(subject_rows(buttons))
}

/// Sub-menu listing: the menu's own buttons plus a way back to the top level.
pub fn build_submenu_keyboard(buttons: &[Button]) -> InlineKeyboardMarkup {
    let mut rows = subject_rows(buttons);
    rows.push(back_row());
    InlineKeyboardMarkup::new(rows)
}

/// File listing under a subject, one file per row, back row last.
pub fn build_file_keyboard(materials: &[Material]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = materials
        .iter()
        .map(|material| {
            vec![InlineKeyboardButton::callback(
                material.file_name.clone(),
                format!("file_{}", material.id),
            )]
        })
        .collect();
    rows.push(back_row());
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use teloxide::types::InlineKeyboardButtonKind;

    fn button(id: i32, name: &str) -> Button {
        Button {
            id,
            name: name.to_string(),
            goes_to_menu_id: None,
            created_at: Utc::now(),
        }
    }

    fn material(id: i32, file_name: &str) -> Material {
        Material {
            id,
            file_name: file_name.to_string(),
            message_id: 1000 + id as i64,
            chat_id: -100,
            button_id: 1,
            created_at: Utc::now(),
        }
    }

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("expected callback button, got {:?}", other),
        }
    }

    #[test]
    fn subject_keyboard_encodes_subject_names() {
        let keyboard = build_subject_keyboard(&[button(1, "Math"), button(2, "Physics")]);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "Math");
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "subj_Math");
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[1][0]),
            "subj_Physics"
        );
    }

    #[test]
    fn submenu_keyboard_ends_with_back_row() {
        let keyboard = build_submenu_keyboard(&[button(1, "Exams")]);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        let back = &keyboard.inline_keyboard[1][0];
        assert_eq!(back.text, BACK_BUTTON_LABEL);
        assert_eq!(callback_data(back), BACK_CALLBACK_DATA);
    }

    #[test]
    fn file_keyboard_encodes_material_ids_and_back_row() {
        let keyboard = build_file_keyboard(&[material(7, "Algebra Notes")]);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "Algebra Notes");
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "file_7");
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[1][0]),
            BACK_CALLBACK_DATA
        );
    }
}
