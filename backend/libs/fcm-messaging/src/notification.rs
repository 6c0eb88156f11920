use serde::Serialize;

/// User-visible part of a push notification
///
/// Every field is optional. Unset fields are dropped from the wire payload by
/// [`Messenger::serialize`](crate::Messenger::serialize); the derived
/// `Serialize` impl alone emits them as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Notification {
    badge: Option<String>,
    body: Option<String>,
    body_loc_args: Option<Vec<String>>,
    body_loc_key: Option<String>,
    click_action: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    sound: Option<String>,
    tag: Option<String>,
    title: Option<String>,
    title_loc_args: Option<Vec<String>>,
    title_loc_key: Option<String>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notification title. Required on Android, not shown on iOS phones and tablets.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Drawable resource name on Android (`myicon` for `@drawable/myicon`)
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.icon = Some(icon.into());
        self
    }

    /// `default` or the file name of a sound bundled with the app
    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    pub fn set_sound(&mut self, sound: impl Into<String>) -> &mut Self {
        self.sound = Some(sound.into());
        self
    }

    /// iOS home screen badge
    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    pub fn set_badge(&mut self, badge: impl Into<String>) -> &mut Self {
        self.badge = Some(badge.into());
        self
    }

    /// Android only. A notification with the same tag replaces the one already shown.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    /// Android only. Icon color in `#rrggbb` form (not validated).
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.color = Some(color.into());
        self
    }

    /// Intent filter to launch on Android, APNs `category` on iOS
    pub fn click_action(&self) -> Option<&str> {
        self.click_action.as_deref()
    }

    pub fn set_click_action(&mut self, click_action: impl Into<String>) -> &mut Self {
        self.click_action = Some(click_action.into());
        self
    }

    pub fn body_loc_key(&self) -> Option<&str> {
        self.body_loc_key.as_deref()
    }

    pub fn set_body_loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.body_loc_key = Some(key.into());
        self
    }

    pub fn body_loc_args(&self) -> Option<&[String]> {
        self.body_loc_args.as_deref()
    }

    pub fn set_body_loc_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_loc_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn title_loc_key(&self) -> Option<&str> {
        self.title_loc_key.as_deref()
    }

    pub fn set_title_loc_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.title_loc_key = Some(key.into());
        self
    }

    pub fn title_loc_args(&self) -> Option<&[String]> {
        self.title_loc_args.as_deref()
    }

    pub fn set_title_loc_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_loc_args = Some(args.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_empty() {
        let notification = Notification::new();

        assert_eq!(notification.title(), None);
        assert_eq!(notification.body_loc_args(), None);
        assert_eq!(notification, Notification::default());
    }

    #[test]
    fn test_setters_store_verbatim() {
        let mut notification = Notification::new();
        notification
            .set_title("title")
            .set_color("not-a-color")
            .set_body_loc_args(["arg1", "arg2"])
            .set_title_loc_args(Vec::<String>::new());

        assert_eq!(notification.title(), Some("title"));
        assert_eq!(notification.color(), Some("not-a-color"));
        assert_eq!(
            notification.body_loc_args(),
            Some(&["arg1".to_string(), "arg2".to_string()][..])
        );
        assert_eq!(notification.title_loc_args(), Some(&[][..]));
    }

    #[test]
    fn test_setter_overwrites_previous_value() {
        let mut notification = Notification::new();
        notification.set_tag("first");
        notification.set_tag("second");

        assert_eq!(notification.tag(), Some("second"));
    }
}
