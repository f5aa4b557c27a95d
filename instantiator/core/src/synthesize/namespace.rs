use crate::{
    k8s::{Namespace, ObjectMeta, PodInstanciator},
    naming,
};

pub fn namespace(parent: &PodInstanciator) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(naming::namespace_name(parent)),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mk_parent;

    #[test]
    fn named_after_target_namespace() {
        let ns = namespace(&mk_parent("web", vec![]));
        assert_eq!(ns.metadata.name.as_deref(), Some("apps"));
        assert_eq!(ns.spec, None);
    }
}
