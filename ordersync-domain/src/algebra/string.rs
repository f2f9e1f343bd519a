pub trait StringExt {
    fn snake_case(&self) -> String;
    /// Form used when comparing company names: surrounding whitespace removed
    /// and lower-cased.
    fn normalized_name(&self) -> String;
    /// Form used when comparing extra-field labels.
    fn field_label(&self) -> String;
}

impl StringExt for String {
    fn snake_case(&self) -> String {
        let mut snake_case = String::new();

        for (i, c) in self.chars().enumerate() {
            if c.is_ascii_uppercase() && i > 0 {
                snake_case.push('_');
                snake_case.push(c.to_ascii_lowercase());
            } else {
                snake_case.push(c.to_ascii_lowercase());
            }
        }

        snake_case
    }

    fn normalized_name(&self) -> String {
        self.trim().to_lowercase()
    }

    fn field_label(&self) -> String {
        self.to_uppercase()
    }
}

impl<'a> StringExt for &'a str {
    fn snake_case(&self) -> String {
        self.to_string().snake_case()
    }

    fn normalized_name(&self) -> String {
        self.trim().to_lowercase()
    }

    fn field_label(&self) -> String {
        self.to_uppercase()
    }
}
