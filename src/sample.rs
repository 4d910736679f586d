//! Built-in sample CRD

/// Sample document used by `generate --sample` and `init --with-sample`
pub const SAMPLE_CRD: &str = r#"apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: myresource
spec:
  group: mygroup.example.com
  version: v1alpha1
  names:
    plural: myresources
    singular: myresource
    kind: MyResource
  scope: Namespaced
  validation:
    openAPIV3Schema:
      properties:
        spec:
          type: object
          properties:
            size:
              type: integer
            config:
              type: object
              properties:
                replicas:
                  type: integer
                  default: 1
                resources:
                  type: object
                  properties:
                    cpu:
                      type: string
                      format: "resource"
                      default: "100m"
                    memory:
                      type: string
                      format: "resource"
                      default: "256Mi"
              required:
                - replicas
"#;
