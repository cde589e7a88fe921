use crate::calendar::Target;

const RULE_WIDTH: usize = 60;

pub fn render_report(target: &Target, text: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\nMenu for {target}\n{rule}\n{text}\n{rule}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::day_by_name;

    #[test]
    fn report_is_framed_by_rules() {
        let target = Target {
            week: 42,
            day: day_by_name("fredag").unwrap(),
        };
        let report = render_report(&target, "Soup\n\nSalad");
        let lines: Vec<_> = report.lines().collect();

        let rule = "=".repeat(60);
        assert_eq!(lines[0], rule);
        assert_eq!(lines[1], "Menu for Fredag (Friday), week 42");
        assert_eq!(lines[2], rule);
        assert_eq!(&lines[3..6], ["Soup", "", "Salad"]);
        assert_eq!(lines[6], rule);
        assert_eq!(lines.len(), 7);
    }
}
