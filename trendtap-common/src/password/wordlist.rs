/// Top entries from public breach corpora. Matching is by exact,
/// case-insensitive comparison; substring matching is left to the
/// forbidden-pattern checks.
pub(crate) static COMMON_PASSWORDS: &[&str] = &[
    "password", "123456", "123456789", "12345678", "12345", "1234567", "1234567890", "qwerty",
    "abc123", "111111", "123123", "admin", "letmein", "welcome", "monkey", "login",
    "dragon", "passw0rd", "master", "hello", "freedom", "whatever", "qazwsx", "trustno1",
    "654321", "jordan23", "harley", "password1", "1234", "robert", "matthew", "jordan",
    "asshole", "daniel", "andrew", "lakers", "andrea", "buster", "joshua", "1qaz2wsx",
    "12341234", "ferrari", "cherry", "hunter", "michael", "shadow", "mustang", "baseball",
    "superman", "696969", "batman", "soccer", "charlie", "pussy", "hockey", "killer",
    "george", "sexy", "thomas", "ranger", "michelle", "football", "jessica", "pepper",
    "jennifer", "zxcvbnm", "asdfgh", "asdfghjkl", "summer", "nicole", "chelsea", "biteme",
    "access", "yankees", "987654321", "dallas", "austin", "thunder", "taylor", "matrix",
    "mobilemail", "mom", "monitor", "monitoring", "montana", "moon", "moscow", "princess",
    "starwars", "computer", "corvette", "hannah", "bailey", "ginger", "amanda", "cookie",
    "sunshine", "iloveyou", "2000", "maggie", "654123", "samsung", "secret", "internet",
    "service", "flower", "qwertyuiop", "121212", "000000", "112233", "azerty", "888888",
    "photoshop", "aaaaaa", "test", "default", "changeme", "passport", "password123",
    "welcome1", "admin123", "root", "toor", "guest", "qwerty123", "1q2w3e4r", "zaq12wsx",
];

pub fn is_common_password(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PASSWORDS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        assert!(is_common_password("password"));
        assert!(is_common_password("PassWord"));
        assert!(is_common_password("LETMEIN"));
    }

    #[test]
    fn no_substring_matching() {
        assert!(!is_common_password("password-but-longer"));
        assert!(!is_common_password("xpassword"));
    }

    #[test]
    fn list_is_lowercase() {
        // the lookup lowercases its input once, so entries must already be
        // lowercase to ever match
        for entry in COMMON_PASSWORDS {
            assert_eq!(*entry, entry.to_lowercase());
        }
    }
}
