use super::schema::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) =
            std::env::var("STYLIST_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY"))
            && !key.trim().is_empty()
        {
            self.api_key = Some(key.trim().to_string());
        }

        if let Ok(model) = std::env::var("STYLIST_MODEL")
            && !model.is_empty()
        {
            self.stylist.model = model;
        }

        if let Ok(data_dir) = std::env::var("STYLIST_DATA_DIR")
            && !data_dir.is_empty()
        {
            self.storage.data_dir = Some(data_dir);
        }

        if let Ok(temp_str) = std::env::var("STYLIST_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.stylist.temperature = temp;
        }

        if let Ok(secs_str) = std::env::var("STYLIST_TIMEOUT_SECS")
            && let Ok(secs) = secs_str.parse::<u64>()
            && secs > 0
        {
            self.stylist.timeout_secs = secs;
        }
    }
}
