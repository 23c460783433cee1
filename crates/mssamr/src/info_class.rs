//! USER_INFORMATION_CLASS selector for `SamrQueryInformationUser`

use std::fmt;

macro_rules! info_classes {
    ($($(#[$attr:meta])* $variant:ident = $value:literal),* $(,)?) => {
        /// MS-SAMR USER_INFORMATION_CLASS (marshalled as a 16-bit enum)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(u16)]
        pub enum UserInformationClass {
            $($(#[$attr])* $variant = $value,)*
        }

        impl UserInformationClass {
            /// Every defined class, in ascending order
            pub const ALL: &'static [UserInformationClass] = &[$(UserInformationClass::$variant,)*];

            pub fn from_u16(value: u16) -> Option<Self> {
                match value {
                    $($value => Some(UserInformationClass::$variant),)*
                    _ => None,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(UserInformationClass::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

info_classes! {
    UserGeneralInformation = 1,
    UserPreferencesInformation = 2,
    UserLogonInformation = 3,
    UserLogonHoursInformation = 4,
    UserAccountInformation = 5,
    UserNameInformation = 6,
    UserAccountNameInformation = 7,
    UserFullNameInformation = 8,
    UserPrimaryGroupInformation = 9,
    UserHomeInformation = 10,
    UserScriptInformation = 11,
    UserProfileInformation = 12,
    UserAdminCommentInformation = 13,
    UserWorkStationsInformation = 14,
    UserControlInformation = 16,
    UserExpiresInformation = 17,
    UserInternal1Information = 18,
    UserParametersInformation = 20,
    #[default]
    UserAllInformation = 21,
    UserInternal4Information = 23,
    UserInternal5Information = 24,
    UserInternal4InformationNew = 25,
    UserInternal5InformationNew = 26,
}

impl UserInformationClass {
    pub fn value(&self) -> u16 {
        *self as u16
    }
}

impl From<UserInformationClass> for u16 {
    fn from(class: UserInformationClass) -> Self {
        class.value()
    }
}

impl fmt::Display for UserInformationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.value())
    }
}
