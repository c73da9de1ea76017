use crate::mail::{AddressField, Mailbox, MailboxGroup};

/// A formatter for the address headers of a message.
///
/// Values are formatted as plain text. Escaping them for HTML is left to the template.
///
#[derive(Debug, Default)]
pub struct AddressFormatter {}

impl AddressFormatter {
    /// Formats a `Mailbox` into an optional `String`.
    ///
    /// Here are the formatting rules:
    /// 1. Name AND Address -> Some("Name <Address>")
    /// 2. Name -> Some("Name")
    /// 3. Address -> Some("Address")
    /// 4. Neither -> None
    ///
    pub fn format_mailbox(&self, mailbox: &Mailbox) -> Option<String> {
        let name = non_empty(mailbox.name.as_deref());
        let address = non_empty(mailbox.address.as_deref());
        match (name, address) {
            (Some(name), Some(address)) => Some(format!("{} <{}>", name, address)),
            (Some(name), None) => Some(name.to_string()),
            (None, Some(address)) => Some(address.to_string()),
            (None, None) => None,
        }
    }

    /// Formats a list of `Mailbox` into an optional `String`.
    ///
    /// The mailboxes are formatted using `format_mailbox` and then concatenated into a single string separated by ", ".
    ///
    pub fn format_mailboxes(&self, mailboxes: &[Mailbox]) -> Option<String> {
        join(mailboxes.iter().filter_map(|mailbox| self.format_mailbox(mailbox)))
    }

    /// Formats a `MailboxGroup` into an optional `String`.
    ///
    /// ### Example Output
    ///
    /// ```text
    /// "GroupName: Name1 <address1@domain1>, address2@domain2, ...;"
    /// ```
    ///
    /// A group without a name is formatted as its plain list of mailboxes.
    ///
    pub fn format_group(&self, group: &MailboxGroup) -> Option<String> {
        let mailboxes = self.format_mailboxes(&group.mailboxes);
        match non_empty(group.name.as_deref()) {
            Some(name) => Some(format!("{}: {};", name, mailboxes.unwrap_or_default())),
            None => mailboxes,
        }
    }

    /// Formats a list of `MailboxGroup` into an optional `String`, separated by ", ".
    ///
    pub fn format_groups(&self, groups: &[MailboxGroup]) -> Option<String> {
        join(groups.iter().filter_map(|group| self.format_group(group)))
    }

    /// Formats the value of an address header, or `None` if there is nothing to show.
    ///
    pub fn format_field(&self, field: Option<&AddressField>) -> Option<String> {
        match field? {
            AddressField::List(mailboxes) => self.format_mailboxes(mailboxes),
            AddressField::Groups(groups) => self.format_groups(groups),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn join(values: impl Iterator<Item = String>) -> Option<String> {
    let values: Vec<String> = values.collect();
    (!values.is_empty()).then(|| values.join(", "))
}
