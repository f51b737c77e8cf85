//! Sequence-diagram model objects: instances and messages.

use std::rc::Rc;

/// The model side of a sequence-diagram instance (lifeline).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdInstanceModel {
    pub id: i32,
    pub instance_name: String,
    pub life_line_length: i32,
}

/// The model side of a sequence-diagram message.
///
/// The wire format stores the endpoint instance identifiers on the outer
/// graphic wrapper, not on the message element itself, so a freshly built
/// message has `source`/`destination` unset. The resolver fills them in
/// with [`SdMessageModel::attach_instances`] once both instances are
/// looked up; after a successful document load both are always `Some`.
#[derive(Debug, Clone, Default)]
pub struct SdMessageModel {
    pub id: i32,
    pub message: String,
    /// Vertical position of the message start on the source lifeline.
    pub source_time: i32,
    /// Vertical position of the message end on the destination lifeline.
    pub destination_time: i32,
    pub source: Option<Rc<SdInstanceModel>>,
    pub destination: Option<Rc<SdInstanceModel>>,
}

impl SdMessageModel {
    /// Record the resolved endpoint instances on the message.
    ///
    /// This is the explicit synchronization step between the wrapper-level
    /// identifiers and the model-level references; it is the only place
    /// these two fields are ever set.
    pub fn attach_instances(
        &mut self,
        source: Rc<SdInstanceModel>,
        destination: Rc<SdInstanceModel>,
    ) {
        self.source = Some(source);
        self.destination = Some(destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_instances_sets_both_references() {
        let a = Rc::new(SdInstanceModel {
            id: 1,
            instance_name: "client".to_string(),
            life_line_length: 200,
        });
        let b = Rc::new(SdInstanceModel {
            id: 2,
            instance_name: "server".to_string(),
            life_line_length: 200,
        });

        let mut message = SdMessageModel::default();
        assert!(message.source.is_none());

        message.attach_instances(Rc::clone(&a), Rc::clone(&b));
        assert_eq!(message.source.as_ref().unwrap().instance_name, "client");
        assert_eq!(message.destination.as_ref().unwrap().instance_name, "server");
    }
}
