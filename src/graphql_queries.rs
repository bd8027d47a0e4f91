//! GraphQL documents sent by the call-site wrappers.

/// Fields selected for a job whenever its detail view is needed.
macro_rules! job_detail_fragment {
    () => {
        r"
    fragment JobDetail on Job {
      id
      title
      company {
        id
        name
      }
      description
    }
"
    };
}

pub const JOB_QUERY: &str = r"
    query JobQuery($id: ID!) {
      job(id: $id) {
        id
        title
        company {
          id
          name
        }
        description
      }
    }
";

pub const JOBS_QUERY: &str = r"
    query JobsQuery {
      jobs {
        id
        title
        company {
          id
          name
        }
      }
    }
";

pub const COMPANY_QUERY: &str = r"
    query CompanyQuery($id: ID!) {
      company(id: $id) {
        id
        name
        description
        jobs {
          id
          title
        }
      }
    }
";

/// Mutation creating a job; the result is aliased to `job` so it shares
/// [`JOB_QUERY`]'s response shape.
pub const CREATE_JOB_MUTATION: &str = concat!(
    r"
    mutation CreateJob($input: CreateJobInput) {
      job: createJob(input: $input) {
        ...JobDetail
      }
    }
",
    job_detail_fragment!()
);
