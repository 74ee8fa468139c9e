/// Renders a card number as `**** **** **** 1234`.
pub fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(|c| !c.is_whitespace()).collect();

    if digits.len() < 4 {
        return "****".to_string();
    }

    let last_four: String = digits[digits.len() - 4..].iter().collect();
    format!("**** **** **** {last_four}")
}
