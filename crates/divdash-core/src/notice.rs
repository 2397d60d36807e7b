//! Transient user notifications.
//!
//! Failures never reach the user as raw errors; the controller maps each one
//! to a [`Notice`] whose text comes from a fixed, localized catalog.

use serde::Serialize;

/// Visual tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Language of notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Parses a language tag such as `ru`, `ru-RU` or `en_US`.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("ru") {
            Self::Ru
        } else {
            Self::En
        }
    }
}

/// Every notification the dashboard can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    LoggedIn,
    WrongPassword,
    LoggedOut,
    DataUpdated,
    RefreshFailed,
    ExchangeUnavailable,
    KeyRateUnavailable,
    SampleDataLoaded,
    EntryAdded,
    EntryRemoved,
    FillAllFields,
    NoSuchEntry,
    SettingsSaved,
    InvalidSettings,
    SaveFailed,
    LoginRequired,
}

impl Notice {
    pub const fn kind(self) -> NoticeKind {
        match self {
            Self::LoggedIn
            | Self::LoggedOut
            | Self::DataUpdated
            | Self::SampleDataLoaded
            | Self::EntryAdded
            | Self::EntryRemoved
            | Self::SettingsSaved => NoticeKind::Success,
            _ => NoticeKind::Error,
        }
    }

    pub const fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.text_en(),
            Locale::Ru => self.text_ru(),
        }
    }

    const fn text_en(self) -> &'static str {
        match self {
            Self::LoggedIn => "Welcome back",
            Self::WrongPassword => "Wrong password",
            Self::LoggedOut => "Logged out",
            Self::DataUpdated => "Data updated successfully",
            Self::RefreshFailed => "Failed to load data",
            Self::ExchangeUnavailable => "Failed to load data from the exchange",
            Self::KeyRateUnavailable => "Failed to load the key rate",
            Self::SampleDataLoaded => "Sample data loaded",
            Self::EntryAdded => "Asset added to portfolio",
            Self::EntryRemoved => "Asset removed from portfolio",
            Self::FillAllFields => "Fill in all fields",
            Self::NoSuchEntry => "No portfolio entry at that position",
            Self::SettingsSaved => "Settings saved",
            Self::InvalidSettings => "Check the entered values",
            Self::SaveFailed => "Failed to save changes",
            Self::LoginRequired => "Log in first",
        }
    }

    const fn text_ru(self) -> &'static str {
        match self {
            Self::LoggedIn => "Добро пожаловать",
            Self::WrongPassword => "Неверный пароль",
            Self::LoggedOut => "Вы вышли из приложения",
            Self::DataUpdated => "Данные успешно обновлены",
            Self::RefreshFailed => "Ошибка при загрузке данных",
            Self::ExchangeUnavailable => "Ошибка при загрузке данных с биржи",
            Self::KeyRateUnavailable => "Ошибка при загрузке ключевой ставки",
            Self::SampleDataLoaded => "Загружены демонстрационные данные",
            Self::EntryAdded => "Актив добавлен в портфель",
            Self::EntryRemoved => "Актив удален из портфеля",
            Self::FillAllFields => "Заполните все поля",
            Self::NoSuchEntry => "Такой позиции нет в портфеле",
            Self::SettingsSaved => "Настройки сохранены",
            Self::InvalidSettings => "Проверьте правильность введенных данных",
            Self::SaveFailed => "Не удалось сохранить изменения",
            Self::LoginRequired => "Сначала войдите в приложение",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_tag_parsing() {
        assert_eq!(Locale::from_tag("ru_RU.UTF-8"), Locale::Ru);
        assert_eq!(Locale::from_tag("en-GB"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn error_notices_are_error_toned() {
        assert_eq!(Notice::InvalidSettings.kind(), NoticeKind::Error);
        assert_eq!(Notice::SettingsSaved.kind(), NoticeKind::Success);
        assert_eq!(Notice::WrongPassword.text(Locale::Ru), "Неверный пароль");
    }
}
