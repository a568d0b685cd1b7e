mod update_preferences;

pub use update_preferences::UpdatePreferencesUseCase;
